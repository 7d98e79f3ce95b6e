//! Promotional content refresh.
//!
//! # Responsibility
//! - Compare the server content version with the last applied one.
//! - Re-pull news only when the version changed or the cache went stale.
//!
//! # Invariants
//! - The applied version is stored only after news were updated from the
//!   network, so a failed pull is retried at the next check.
//! - A failed version check never reports an update.
//! - Periodic checks never re-enter the news sync while it is in flight.

use crate::clock::{Clock, IntervalTimer};
use crate::config::CoreConfig;
use crate::model::news::NewsItem;
use crate::repo::cache_repo::CacheRepository;
use crate::schedule::{api, fallback};
use crate::sync::orchestrator::{SyncOrchestrator, SyncOutcome, SyncStatus};
use crate::sync::resource::{ResourceKey, ResourceKind};
use crate::sync::source::ScheduleSource;
use log::{debug, info, warn};

/// Result of one version comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentCheck {
    UpToDate,
    UpdateAvailable { version: String },
    /// Version could not be fetched.
    Unknown,
}

pub struct ContentRefresher<'o, R: CacheRepository, C: Clock, S: ScheduleSource> {
    orchestrator: &'o SyncOrchestrator<R, C>,
    source: S,
    config: CoreConfig,
    timer: IntervalTimer,
}

impl<'o, R: CacheRepository, C: Clock, S: ScheduleSource> ContentRefresher<'o, R, C, S> {
    pub fn new(orchestrator: &'o SyncOrchestrator<R, C>, source: S, config: CoreConfig) -> Self {
        let timer = IntervalTimer::new(config.content_check_interval());
        Self {
            orchestrator,
            source,
            config,
            timer,
        }
    }

    /// Version token of the news currently in cache.
    pub fn applied_version(&self) -> Option<String> {
        self.orchestrator.cached(&version_key())
    }

    pub fn check_for_update(&self) -> ContentCheck {
        let remote = self
            .source
            .fetch_content_version()
            .and_then(|body| api::decode_content_version(&body));
        match remote {
            Ok(version) if self.applied_version().as_deref() == Some(version.as_str()) => {
                ContentCheck::UpToDate
            }
            Ok(version) => {
                info!("event=content_check module=content status=update_available");
                ContentCheck::UpdateAvailable { version }
            }
            Err(err) => {
                warn!("event=content_check module=content status=error error={err}");
                ContentCheck::Unknown
            }
        }
    }

    /// News through the regular freshness gate, without a version check.
    pub fn news(&self, force: bool) -> SyncOutcome<Vec<NewsItem>> {
        let key = news_key();
        self.orchestrator.sync(
            &key,
            self.config.freshness_for(key.kind()),
            force,
            || {
                self.source
                    .fetch_news()
                    .and_then(|body| api::decode_news(&body))
            },
            fallback::news,
        )
    }

    /// Checks the version and re-pulls news when it changed.
    pub fn refresh_if_needed(&self) -> SyncOutcome<Vec<NewsItem>> {
        match self.check_for_update() {
            ContentCheck::UpdateAvailable { version } => {
                // A forced pull would supersede a fetch that is still running.
                let outcome = self.news(!self.news_in_flight());
                if outcome.status == SyncStatus::Updated {
                    if let Err(err) = self.orchestrator.store().put(&version_key(), &version) {
                        warn!(
                            "event=content_version module=content status=error error_code=cache_write_failed error={err}"
                        );
                    }
                }
                outcome
            }
            ContentCheck::UpToDate | ContentCheck::Unknown => self.news(false),
        }
    }

    /// Runs `refresh_if_needed` when the check interval elapsed.
    ///
    /// Skipped without consuming the interval while news are in flight.
    pub fn poll(&mut self) -> Option<SyncOutcome<Vec<NewsItem>>> {
        if self.news_in_flight() {
            debug!("event=content_poll module=content status=skipped reason=in_flight");
            return None;
        }
        if !self.timer.poll(self.orchestrator.store().clock()) {
            return None;
        }
        Some(self.refresh_if_needed())
    }

    fn news_in_flight(&self) -> bool {
        self.orchestrator.is_loading(&news_key())
    }
}

fn news_key() -> ResourceKey {
    ResourceKey::global(ResourceKind::News)
}

fn version_key() -> ResourceKey {
    ResourceKey::global(ResourceKind::ContentVersion)
}
