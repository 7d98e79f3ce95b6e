//! Offline-first schedule core for MPTapp.
//! This crate is the single source of truth for lesson identity, schedule
//! projection, cache freshness and vote ledger invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod sync;
pub mod voting;

pub use clock::{Clock, IntervalTimer, ManualClock, SystemClock};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::identity::{derive_identity, IdentityFields, IdentityScheme, LessonIdentity, LessonVariant};
pub use model::schedule::{ProjectedDay, ProjectedLesson, ReplacementEntry, WeekTemplate};
pub use repo::{RepoError, RepoResult};
pub use schedule::projector::{project, project_week};
pub use service::schedule_service::ScheduleService;
pub use sync::cache_store::{CacheError, CacheStore};
pub use sync::orchestrator::{
    FetchTicket, KeyStates, SyncOrchestrator, SyncOutcome, SyncStatus, ValueSource,
};
pub use sync::source::{FetchError, FetchResult, ScheduleSource};
pub use voting::ledger::{VoteError, VoteLedger};
pub use voting::window::{window_at, VotingWindow};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
