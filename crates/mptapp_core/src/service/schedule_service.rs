//! Schedule use-case service.
//!
//! # Responsibility
//! - Wire each remote resource through the sync pipeline with its decoder
//!   and bundled fallback.
//! - Answer per-date schedule queries from cached data only.
//!
//! # Invariants
//! - Network access happens only inside `load_*` and `complete_*` calls.
//! - `day_schedule`/`week_schedule` never fail; missing data projects to
//!   empty days.

use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::model::catalog::{Group, Specialty, WeekInfo};
use crate::model::schedule::{ProjectedDay, ReplacementSchedule, WeekTemplate};
use crate::repo::cache_repo::CacheRepository;
use crate::schedule::{api, fallback, projector};
use crate::sync::orchestrator::{FetchTicket, SyncOrchestrator, SyncOutcome};
use crate::sync::resource::{ResourceKey, ResourceKind};
use crate::sync::source::{FetchResult, ScheduleSource};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Either a fresh request or the second half of a fetch begun elsewhere.
enum Trigger {
    Request { force: bool },
    Resume(FetchTicket),
}

pub struct ScheduleService<'o, R: CacheRepository, C: Clock, S: ScheduleSource> {
    orchestrator: &'o SyncOrchestrator<R, C>,
    source: S,
    config: CoreConfig,
}

impl<'o, R: CacheRepository, C: Clock, S: ScheduleSource> ScheduleService<'o, R, C, S> {
    pub fn new(orchestrator: &'o SyncOrchestrator<R, C>, source: S, config: CoreConfig) -> Self {
        Self {
            orchestrator,
            source,
            config,
        }
    }

    pub fn orchestrator(&self) -> &SyncOrchestrator<R, C> {
        self.orchestrator
    }

    pub fn load_week_info(&self, force: bool) -> SyncOutcome<WeekInfo> {
        self.week_info_with(Trigger::Request { force })
    }

    pub fn complete_week_info(&self, ticket: FetchTicket) -> SyncOutcome<WeekInfo> {
        self.week_info_with(Trigger::Resume(ticket))
    }

    pub fn load_specialties(&self, force: bool) -> SyncOutcome<Vec<Specialty>> {
        self.specialties_with(Trigger::Request { force })
    }

    pub fn complete_specialties(&self, ticket: FetchTicket) -> SyncOutcome<Vec<Specialty>> {
        self.specialties_with(Trigger::Resume(ticket))
    }

    pub fn load_groups(&self, specialty_id: &str, force: bool) -> SyncOutcome<Vec<Group>> {
        self.groups_with(specialty_id, Trigger::Request { force })
    }

    pub fn complete_groups(&self, specialty_id: &str, ticket: FetchTicket) -> SyncOutcome<Vec<Group>> {
        self.groups_with(specialty_id, Trigger::Resume(ticket))
    }

    /// Loads the week template of `group`, anchored to the current week.
    pub fn load_week_template(&self, group: &Group, force: bool) -> SyncOutcome<WeekTemplate> {
        self.week_template_with(group, Trigger::Request { force })
    }

    /// Finishes a template fetch begun with `SyncOrchestrator::begin_fetch`.
    pub fn complete_week_template(&self, group: &Group, ticket: FetchTicket) -> SyncOutcome<WeekTemplate> {
        self.week_template_with(group, Trigger::Resume(ticket))
    }

    pub fn load_replacements(&self, group_id: &str, force: bool) -> SyncOutcome<ReplacementSchedule> {
        self.replacements_with(group_id, Trigger::Request { force })
    }

    pub fn complete_replacements(
        &self,
        group_id: &str,
        ticket: FetchTicket,
    ) -> SyncOutcome<ReplacementSchedule> {
        self.replacements_with(group_id, Trigger::Resume(ticket))
    }

    fn week_info_with(&self, trigger: Trigger) -> SyncOutcome<WeekInfo> {
        let key = ResourceKey::global(ResourceKind::WeekInfo);
        self.run(
            &key,
            trigger,
            || {
                self.source
                    .fetch_week_info()
                    .and_then(|body| api::decode_week_info(&body))
            },
            fallback::week_info,
        )
    }

    fn specialties_with(&self, trigger: Trigger) -> SyncOutcome<Vec<Specialty>> {
        let key = ResourceKey::global(ResourceKind::Specialties);
        self.run(
            &key,
            trigger,
            || {
                self.source
                    .fetch_specialties()
                    .and_then(|body| api::decode_specialties(&body))
            },
            fallback::specialties,
        )
    }

    fn groups_with(&self, specialty_id: &str, trigger: Trigger) -> SyncOutcome<Vec<Group>> {
        let key = ResourceKey::scoped(ResourceKind::Groups, specialty_id);
        self.run(
            &key,
            trigger,
            || {
                self.source
                    .fetch_groups(specialty_id)
                    .and_then(|body| api::decode_groups(&body))
            },
            || fallback::groups(specialty_id),
        )
    }

    fn week_template_with(&self, group: &Group, trigger: Trigger) -> SyncOutcome<WeekTemplate> {
        let key = ResourceKey::scoped(ResourceKind::Schedule, group.id.as_str());
        let today = self.today();
        self.run(
            &key,
            trigger,
            || {
                self.source
                    .fetch_week_schedule(&group.id, &group.specialty_id)
                    .and_then(|body| api::decode_week_template(&body, today))
            },
            || fallback::week_template(&group.id, &group.specialty_id, today),
        )
    }

    fn replacements_with(&self, group_id: &str, trigger: Trigger) -> SyncOutcome<ReplacementSchedule> {
        let key = ResourceKey::scoped(ResourceKind::Replacements, group_id);
        self.run(
            &key,
            trigger,
            || {
                self.source
                    .fetch_replacements(group_id)
                    .and_then(|body| api::decode_replacements(&body, group_id))
            },
            || fallback::replacements(group_id),
        )
    }

    fn run<T, F, D>(&self, key: &ResourceKey, trigger: Trigger, fetch: F, fallback: D) -> SyncOutcome<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> FetchResult<T>,
        D: FnOnce() -> T,
    {
        match trigger {
            Trigger::Request { force } => self.orchestrator.sync(
                key,
                self.config.freshness_for(key.kind()),
                force,
                fetch,
                fallback,
            ),
            Trigger::Resume(ticket) => self.orchestrator.resume(key, ticket, fetch, fallback),
        }
    }

    /// Cached template of a group, if one was ever stored.
    pub fn cached_template(&self, group_id: &str) -> Option<WeekTemplate> {
        self.orchestrator
            .cached(&ResourceKey::scoped(ResourceKind::Schedule, group_id))
    }

    pub fn cached_replacements(&self, group_id: &str) -> Option<ReplacementSchedule> {
        self.orchestrator
            .cached(&ResourceKey::scoped(ResourceKind::Replacements, group_id))
    }

    /// Projects the cached template and replacements onto `date`.
    pub fn day_schedule(&self, group_id: &str, date: NaiveDate) -> ProjectedDay {
        let template = self.cached_template(group_id);
        let replacements = self.cached_replacements(group_id);
        projector::project(
            template.as_ref(),
            date,
            replacements.as_ref(),
            self.config.identity_scheme,
        )
    }

    pub fn week_schedule(&self, group_id: &str, date: NaiveDate) -> Vec<ProjectedDay> {
        let template = self.cached_template(group_id);
        let replacements = self.cached_replacements(group_id);
        projector::project_week(
            template.as_ref(),
            date,
            replacements.as_ref(),
            self.config.identity_scheme,
        )
    }

    pub fn today(&self) -> NaiveDate {
        self.orchestrator.store().clock().now_local().date()
    }
}
