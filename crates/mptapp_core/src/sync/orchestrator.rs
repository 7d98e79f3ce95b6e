//! Cache → network → fallback pipeline for one resource key at a time.
//!
//! # Responsibility
//! - Skip the network while a cached value is fresh.
//! - Serve a cached value before any network result is published.
//! - Replace the cached value on success; keep it on failure.
//! - Fall back to bundled data when neither network nor cache has a value.
//!
//! # Invariants
//! - At most one effective fetch per key: a non-forced request while one is
//!   in flight is deduplicated, a forced request supersedes the older one.
//! - A superseded response never touches the cache or the key state.
//! - `CachedValueServed` is always published before `Updated`/`Degraded`.
//! - No automatic retry; failures are recorded and surfaced as status.
//! - A ticket is accepted at most once, and only while its generation is the
//!   latest one begun for the key.

use crate::clock::Clock;
use crate::repo::cache_repo::CacheRepository;
use crate::sync::cache_store::CacheStore;
use crate::sync::events::{EventHub, SyncEvent, SyncIssue};
use crate::sync::resource::ResourceKey;
use crate::sync::source::FetchResult;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Where the returned value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Cache,
    Network,
    Fallback,
}

/// How a sync request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Cached value was fresh; the network was not contacted.
    Fresh,
    /// Network value was fetched and cached.
    Updated,
    /// Fetch failed; the cached value is served.
    StaleButUsable,
    /// Fetch failed and nothing was cached; fallback data is served.
    Offline,
    /// Another fetch for the key is running; no new fetch was started.
    InFlight,
    /// A newer request took over; this response was dropped.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome<T> {
    pub value: T,
    pub source: ValueSource,
    pub status: SyncStatus,
}

/// Permission to complete one fetch for `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: ResourceKey,
    generation: u64,
}

impl FetchTicket {
    /// Rebuilds a ticket handed out by `begin_fetch`, e.g. after it crossed
    /// the FFI boundary as a bare generation.
    pub fn resume(key: ResourceKey, generation: u64) -> Self {
        Self { key, generation }
    }

    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct KeyState {
    in_flight: bool,
    generation: u64,
    last_issue: Option<SyncIssue>,
}

/// In-flight and generation bookkeeping for every key.
///
/// Shared through `Arc` when orchestrators are short-lived, so tickets begun
/// by one orchestrator are checked by the next.
#[derive(Debug, Default)]
pub struct KeyStates {
    inner: Mutex<HashMap<ResourceKey, KeyState>>,
}

impl KeyStates {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct SyncOrchestrator<R: CacheRepository, C: Clock> {
    store: CacheStore<R, C>,
    states: Arc<KeyStates>,
    events: EventHub,
}

impl<R: CacheRepository, C: Clock> SyncOrchestrator<R, C> {
    pub fn new(store: CacheStore<R, C>) -> Self {
        Self::with_key_states(store, Arc::new(KeyStates::new()))
    }

    /// Orchestrator that reads and updates an existing key-state table.
    pub fn with_key_states(store: CacheStore<R, C>, states: Arc<KeyStates>) -> Self {
        Self {
            store,
            states,
            events: EventHub::new(),
        }
    }

    pub fn store(&self) -> &CacheStore<R, C> {
        &self.store
    }

    pub fn subscribe(&self) -> Receiver<SyncEvent> {
        self.events.subscribe()
    }

    pub fn is_loading(&self, key: &ResourceKey) -> bool {
        self.lock_states()
            .get(key)
            .is_some_and(|state| state.in_flight)
    }

    /// Failure recorded by the most recent completed fetch, cleared on success.
    pub fn last_issue(&self, key: &ResourceKey) -> Option<SyncIssue> {
        self.lock_states()
            .get(key)
            .and_then(|state| state.last_issue.clone())
    }

    /// Pull query for the current cached value, fresh or not.
    pub fn cached<T: DeserializeOwned>(&self, key: &ResourceKey) -> Option<T> {
        self.store.get(key)
    }

    /// Runs the full pipeline for `key`.
    ///
    /// `fetch` is invoked at most once and only when a fetch is needed.
    /// `fallback` is invoked only when no cached value exists and the
    /// network cannot provide one.
    pub fn sync<T, F, D>(
        &self,
        key: &ResourceKey,
        freshness: Duration,
        force: bool,
        fetch: F,
        fallback: D,
    ) -> SyncOutcome<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> FetchResult<T>,
        D: FnOnce() -> T,
    {
        if !force && self.store.is_fresh(key, freshness) {
            if let Some(value) = self.store.get(key) {
                info!("event=sync module=sync status=fresh key={key}");
                return SyncOutcome {
                    value,
                    source: ValueSource::Cache,
                    status: SyncStatus::Fresh,
                };
            }
        }

        let Some(ticket) = self.begin_fetch(key, force) else {
            return self.without_fetch(key, SyncStatus::InFlight, fallback);
        };
        self.run_ticket(ticket, fetch, fallback)
    }

    /// Finishes a fetch begun earlier with `begin_fetch`.
    ///
    /// A ticket issued for another key is discarded as superseded.
    pub fn resume<T, F, D>(
        &self,
        key: &ResourceKey,
        ticket: FetchTicket,
        fetch: F,
        fallback: D,
    ) -> SyncOutcome<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> FetchResult<T>,
        D: FnOnce() -> T,
    {
        if ticket.key() != key {
            warn!(
                "event=sync module=sync status=rejected key={key} ticket_key={} reason=key_mismatch",
                ticket.key()
            );
            return self.without_fetch(key, SyncStatus::Superseded, fallback);
        }
        self.run_ticket(ticket, fetch, fallback)
    }

    fn run_ticket<T, F, D>(&self, ticket: FetchTicket, fetch: F, fallback: D) -> SyncOutcome<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> FetchResult<T>,
        D: FnOnce() -> T,
    {
        if self.store.contains(ticket.key()) {
            self.events.publish(SyncEvent::CachedValueServed {
                key: ticket.key().clone(),
            });
        }

        let result = fetch();
        self.complete_fetch(ticket, result, fallback)
    }

    /// Marks `key` in flight and returns a ticket, or `None` when a fetch is
    /// already running and `force` is false.
    pub fn begin_fetch(&self, key: &ResourceKey, force: bool) -> Option<FetchTicket> {
        let generation = {
            let mut states = self.lock_states();
            let state = states.entry(key.clone()).or_default();
            if state.in_flight && !force {
                info!("event=sync module=sync status=deduplicated key={key}");
                return None;
            }
            state.in_flight = true;
            state.generation += 1;
            state.generation
        };

        info!("event=sync module=sync status=start key={key} generation={generation} force={force}");
        self.events.publish(SyncEvent::LoadingChanged {
            key: key.clone(),
            loading: true,
        });
        Some(FetchTicket {
            key: key.clone(),
            generation,
        })
    }

    /// Applies the result of the fetch identified by `ticket`.
    pub fn complete_fetch<T, D>(
        &self,
        ticket: FetchTicket,
        result: FetchResult<T>,
        fallback: D,
    ) -> SyncOutcome<T>
    where
        T: Serialize + DeserializeOwned,
        D: FnOnce() -> T,
    {
        let key = ticket.key;
        let current = {
            let mut states = self.lock_states();
            let state = states.entry(key.clone()).or_default();
            if state.in_flight && state.generation == ticket.generation {
                state.in_flight = false;
                true
            } else {
                false
            }
        };

        if !current {
            info!(
                "event=sync module=sync status=superseded key={key} generation={}",
                ticket.generation
            );
            self.events.publish(SyncEvent::ResponseDiscarded {
                key: key.clone(),
                generation: ticket.generation,
            });
            return self.without_fetch(&key, SyncStatus::Superseded, fallback);
        }

        let outcome = match result {
            Ok(value) => {
                if let Err(err) = self.store.put(&key, &value) {
                    warn!(
                        "event=sync module=sync status=error key={key} error_code=cache_write_failed error={err}"
                    );
                }
                self.record_issue(&key, None);
                info!("event=sync module=sync status=updated key={key}");
                self.events
                    .publish(SyncEvent::Updated { key: key.clone() });
                SyncOutcome {
                    value,
                    source: ValueSource::Network,
                    status: SyncStatus::Updated,
                }
            }
            Err(err) => {
                let reason = err.to_string();
                let (outcome, issue) = match self.store.get(&key) {
                    Some(value) => (
                        SyncOutcome {
                            value,
                            source: ValueSource::Cache,
                            status: SyncStatus::StaleButUsable,
                        },
                        SyncIssue::StaleButUsable { reason },
                    ),
                    None => (
                        SyncOutcome {
                            value: fallback(),
                            source: ValueSource::Fallback,
                            status: SyncStatus::Offline,
                        },
                        SyncIssue::Offline { reason },
                    ),
                };
                warn!(
                    "event=sync module=sync status=degraded key={key} outcome={:?} error={err}",
                    outcome.status
                );
                self.record_issue(&key, Some(issue.clone()));
                self.events.publish(SyncEvent::Degraded {
                    key: key.clone(),
                    issue,
                });
                outcome
            }
        };

        self.events.publish(SyncEvent::LoadingChanged {
            key,
            loading: false,
        });
        outcome
    }

    fn without_fetch<T, D>(&self, key: &ResourceKey, status: SyncStatus, fallback: D) -> SyncOutcome<T>
    where
        T: DeserializeOwned,
        D: FnOnce() -> T,
    {
        match self.store.get(key) {
            Some(value) => SyncOutcome {
                value,
                source: ValueSource::Cache,
                status,
            },
            None => SyncOutcome {
                value: fallback(),
                source: ValueSource::Fallback,
                status,
            },
        }
    }

    fn record_issue(&self, key: &ResourceKey, issue: Option<SyncIssue>) {
        self.lock_states().entry(key.clone()).or_default().last_issue = issue;
    }

    fn lock_states(&self) -> MutexGuard<'_, HashMap<ResourceKey, KeyState>> {
        self.states
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
