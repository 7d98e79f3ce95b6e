//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose schedule, sync, voting and homework use-cases to Dart via FRB.
//! - Flatten core errors into response envelopes with readable messages.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - HTTP is performed by the host in two phases: `begin_sync` hands out a
//!   generation, and the matching `sync_*` call passes the response body (or
//!   `None` on failure) together with that generation.
//! - In-flight and generation state lives for the whole process, so a late
//!   response from a superseded request never reaches the cache.

use chrono::NaiveDate;
use log::warn;
use mptapp_core::db::open_db;
use mptapp_core::model::catalog::{Group, Specialty};
use mptapp_core::model::homework::HomeworkRecord;
use mptapp_core::model::rating::{TeacherRating, VoteKind};
use mptapp_core::model::schedule::{ProjectedLesson, ReplacementEntry};
use mptapp_core::repo::cache_repo::SqliteCacheRepository;
use mptapp_core::repo::homework_repo::SqliteHomeworkRepository;
use mptapp_core::repo::rating_repo::SqliteRatingRepository;
use mptapp_core::service::homework_service::HomeworkService;
use mptapp_core::sync::resource::{ResourceKey, ResourceKind};
use mptapp_core::voting::ranking::RatingBoard;
use mptapp_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    window_at, CacheStore, Clock, CoreConfig, FetchError, FetchResult, FetchTicket, KeyStates,
    ScheduleService, ScheduleSource, SyncOrchestrator, SyncOutcome, SystemClock, VoteError,
    VoteLedger, VotingWindow,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

const DB_FILE_NAME: &str = "mptapp.sqlite3";
const DB_PATH_ENV: &str = "MPTAPP_DB_PATH";
const LOCAL_VOTER_ID: &str = "local-device";
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static KEY_STATES: OnceLock<Arc<KeyStates>> = OnceLock::new();

type Orchestrator<'conn> = SyncOrchestrator<SqliteCacheRepository<'conn>, SystemClock>;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to repeat with the same `level + log_dir`.
/// - Returns an empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One lesson of a projected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonItem {
    /// Date-bound identity of the primary variant.
    pub identity: String,
    pub secondary_identity: Option<String>,
    pub slot_number: u8,
    pub subject: String,
    pub teacher: String,
    pub subject_secondary: Option<String>,
    pub teacher_secondary: Option<String>,
    pub campus: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementItem {
    pub slot_number: u8,
    pub original_subject: String,
    pub new_subject: String,
    pub added_at: String,
    pub is_cancellation: bool,
    pub is_transfer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayScheduleResponse {
    pub ok: bool,
    pub date: String,
    pub is_day_off: bool,
    pub lessons: Vec<LessonItem>,
    pub replacements: Vec<ReplacementItem>,
    pub message: String,
}

/// Outcome of one sync call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResponse {
    /// `fresh|updated|stale_but_usable|offline|in_flight|superseded`.
    pub status: String,
    /// `cache|network|fallback`.
    pub source: String,
    /// Non-empty only for `offline`, shown as a soft notice.
    pub notice: String,
}

/// Specialty or group entry; `parent_id` is the specialty of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResponse {
    pub sync: SyncResponse,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotingStatusResponse {
    pub is_open: bool,
    /// Closing time when open, reopening time when closed.
    pub boundary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingItem {
    pub teacher_name: String,
    pub likes: u32,
    pub neutrals: u32,
    pub dislikes: u32,
    pub positive_percent: u32,
    pub user_vote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteResponse {
    pub ok: bool,
    /// Set when the mutation was rejected by the voting window.
    pub voting_closed: bool,
    pub rating: Option<RatingItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingBoardResponse {
    pub ok: bool,
    pub top3: Vec<RatingItem>,
    pub next7: Vec<RatingItem>,
    pub worst: Vec<RatingItem>,
    pub middle: Vec<RatingItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkItem {
    pub lesson_identity: String,
    pub title: String,
    pub notes: String,
    pub due_date: String,
    pub should_remind: bool,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkResponse {
    pub ok: bool,
    pub item: Option<HomeworkItem>,
    pub message: String,
}

/// Whether the host should fetch `kind` (for `scope`) before calling
/// `begin_sync`.
#[flutter_rust_bridge::frb(sync)]
pub fn needs_sync(kind: String, scope: Option<String>) -> bool {
    let Some(key) = resource_key(&kind, scope) else {
        return true;
    };
    with_conn("needs_sync", |conn| {
        let store = CacheStore::new(SqliteCacheRepository::new(conn), SystemClock);
        Ok(!store.is_fresh(&key, CoreConfig::default().freshness_for(key.kind())))
    })
    .unwrap_or(true)
}

/// Marks `kind` (for `scope`) in flight and returns the generation the host
/// must pass back to the matching `sync_*` call.
///
/// # FFI contract
/// - `None` when a fetch is already running and `force` is false; the host
///   should not issue the request.
/// - A forced call supersedes the running fetch; its late response is
///   reported as `superseded` and discarded.
#[flutter_rust_bridge::frb(sync)]
pub fn begin_sync(kind: String, scope: Option<String>, force: bool) -> Option<u64> {
    let key = resource_key(&kind, scope)?;
    with_conn("begin_sync", |conn| {
        Ok(orchestrator(conn)
            .begin_fetch(&key, force)
            .map(|ticket| ticket.generation()))
    })
    .ok()
    .flatten()
}

/// Feeds a fetched week schedule body through the sync pipeline.
#[flutter_rust_bridge::frb(sync)]
pub fn sync_schedule(
    group_id: String,
    specialty_id: String,
    body: Option<String>,
    generation: u64,
) -> SyncResponse {
    let ticket = FetchTicket::resume(
        ResourceKey::scoped(ResourceKind::Schedule, group_id.as_str()),
        generation,
    );
    let group = Group {
        id: group_id.clone(),
        name: group_id,
        specialty_id,
    };
    with_schedule_service("sync_schedule", body, |service| {
        sync_response(&service.complete_week_template(&group, ticket))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn sync_replacements(group_id: String, body: Option<String>, generation: u64) -> SyncResponse {
    let ticket = FetchTicket::resume(
        ResourceKey::scoped(ResourceKind::Replacements, group_id.as_str()),
        generation,
    );
    with_schedule_service("sync_replacements", body, |service| {
        sync_response(&service.complete_replacements(&group_id, ticket))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn sync_specialties(body: Option<String>, generation: u64) -> CatalogResponse {
    let ticket = FetchTicket::resume(ResourceKey::global(ResourceKind::Specialties), generation);
    with_schedule_service("sync_specialties", body, |service| {
        let outcome = service.complete_specialties(ticket);
        CatalogResponse {
            sync: sync_response(&outcome),
            items: outcome.value.into_iter().map(specialty_item).collect(),
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn sync_groups(specialty_id: String, body: Option<String>, generation: u64) -> CatalogResponse {
    let ticket = FetchTicket::resume(
        ResourceKey::scoped(ResourceKind::Groups, specialty_id.as_str()),
        generation,
    );
    with_schedule_service("sync_groups", body, |service| {
        let outcome = service.complete_groups(&specialty_id, ticket);
        CatalogResponse {
            sync: sync_response(&outcome),
            items: outcome.value.into_iter().map(group_item).collect(),
        }
    })
}

/// Projects the cached schedule of `group_id` onto `date` (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_day(group_id: String, date: String) -> DayScheduleResponse {
    let parsed = match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
        Ok(parsed) => parsed,
        Err(_) => return day_failure(date, "date must be YYYY-MM-DD".to_string()),
    };
    let result = with_conn("schedule_day", |conn| {
        let orchestrator = orchestrator(conn);
        let service = ScheduleService::new(&orchestrator, NO_SOURCE, CoreConfig::default());
        Ok(service.day_schedule(&group_id, parsed))
    });
    match result {
        Ok(day) => DayScheduleResponse {
            ok: true,
            date: day.date.format(DATE_FORMAT).to_string(),
            is_day_off: day.is_day_off,
            lessons: day.lessons.iter().map(lesson_item).collect(),
            replacements: day.replacements.iter().map(replacement_item).collect(),
            message: String::new(),
        },
        Err(message) => day_failure(date, message),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn voting_status() -> VotingStatusResponse {
    voting_status_at(SystemClock.now_local())
}

#[flutter_rust_bridge::frb(sync)]
pub fn cast_vote(teacher_name: String, kind: String) -> VoteResponse {
    let Some(kind) = VoteKind::parse(kind.trim()) else {
        return vote_failure(format!("unknown vote kind `{kind}`"), false);
    };
    vote_call("cast_vote", |ledger| {
        ledger.cast_vote(&teacher_name, LOCAL_VOTER_ID, kind).map(Some)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn retract_vote(teacher_name: String) -> VoteResponse {
    vote_call("retract_vote", |ledger| {
        ledger.retract_vote(&teacher_name, LOCAL_VOTER_ID)
    })
}

/// Registers every teacher of the cached schedule of `group_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn register_group_teachers(group_id: String) -> u32 {
    with_conn("register_group_teachers", |conn| {
        let orchestrator = orchestrator(conn);
        let service = ScheduleService::new(&orchestrator, NO_SOURCE, CoreConfig::default());
        let Some(template) = service.cached_template(&group_id) else {
            return Ok(0);
        };
        let names = mptapp_core::schedule::teachers::teacher_names_from_template(&template);
        let ledger = ledger(conn);
        let added = ledger.ensure_subjects(&names).map_err(|err| err.to_string())?;
        Ok(u32::try_from(added).unwrap_or(u32::MAX))
    })
    .unwrap_or(0)
}

#[flutter_rust_bridge::frb(sync)]
pub fn rating_board() -> RatingBoardResponse {
    let result = with_conn("rating_board", |conn| {
        let ledger = ledger(conn);
        let ratings = ledger.ratings().map_err(|err| err.to_string())?;
        let votes = ledger
            .votes_of(LOCAL_VOTER_ID)
            .map_err(|err| err.to_string())?;
        Ok((RatingBoard::new(ratings), votes))
    });
    match result {
        Ok((board, votes)) => {
            let items = |ratings: Vec<&TeacherRating>| -> Vec<RatingItem> {
                ratings
                    .into_iter()
                    .map(|rating| rating_item(rating, user_vote(&votes, &rating.teacher_name)))
                    .collect()
            };
            RatingBoardResponse {
                ok: true,
                top3: items(board.top3()),
                next7: items(board.next7()),
                worst: items(board.worst()),
                middle: items(board.middle()),
                message: String::new(),
            }
        }
        Err(message) => RatingBoardResponse {
            ok: false,
            top3: Vec::new(),
            next7: Vec::new(),
            worst: Vec::new(),
            middle: Vec::new(),
            message,
        },
    }
}

/// Creates or replaces homework of one lesson identity.
#[flutter_rust_bridge::frb(sync)]
pub fn homework_save(
    lesson_identity: String,
    title: String,
    notes: String,
    due_date: String,
    should_remind: bool,
) -> HomeworkResponse {
    let parsed = Uuid::parse_str(lesson_identity.trim())
        .map_err(|_| "lesson_identity must be a UUID".to_string())
        .and_then(|lesson_id| {
            NaiveDate::parse_from_str(due_date.trim(), DATE_FORMAT)
                .map(|due| (lesson_id, due))
                .map_err(|_| "due_date must be YYYY-MM-DD".to_string())
        });
    let (lesson_id, due) = match parsed {
        Ok(parsed) => parsed,
        Err(message) => return homework_failure(message),
    };

    let result = with_conn("homework_save", |conn| {
        HomeworkService::new(SqliteHomeworkRepository::new(conn))
            .save_for_identity(lesson_id, &title, &notes, due, should_remind)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(record) => HomeworkResponse {
            ok: true,
            item: Some(homework_item(&record)),
            message: "Homework saved.".to_string(),
        },
        Err(message) => homework_failure(message),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn homework_get(lesson_identity: String) -> HomeworkResponse {
    let Ok(lesson_id) = Uuid::parse_str(lesson_identity.trim()) else {
        return homework_failure("lesson_identity must be a UUID".to_string());
    };
    let result = with_conn("homework_get", |conn| {
        HomeworkService::new(SqliteHomeworkRepository::new(conn))
            .for_lesson(lesson_id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(record) => HomeworkResponse {
            ok: true,
            item: record.as_ref().map(homework_item),
            message: String::new(),
        },
        Err(message) => homework_failure(message),
    }
}

/// Source that replays one host-provided body for any resource.
struct ProvidedBody(Option<String>);

impl ProvidedBody {
    fn body(&self) -> FetchResult<String> {
        self.0
            .clone()
            .ok_or_else(|| FetchError::Transport("host reported no response".to_string()))
    }
}

impl ScheduleSource for ProvidedBody {
    fn fetch_week_info(&self) -> FetchResult<String> {
        self.body()
    }

    fn fetch_week_schedule(&self, _group_id: &str, _specialty_id: &str) -> FetchResult<String> {
        self.body()
    }

    fn fetch_replacements(&self, _group_id: &str) -> FetchResult<String> {
        self.body()
    }

    fn fetch_specialties(&self) -> FetchResult<String> {
        self.body()
    }

    fn fetch_groups(&self, _specialty_id: &str) -> FetchResult<String> {
        self.body()
    }

    fn fetch_content_version(&self) -> FetchResult<String> {
        self.body()
    }

    fn fetch_news(&self) -> FetchResult<String> {
        self.body()
    }
}

/// Source for read-only paths that never reach the network.
const NO_SOURCE: ProvidedBody = ProvidedBody(None);

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_conn<T>(
    call: &str,
    f: impl FnOnce(&Connection) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("{call} failed: {err}"))?;
    f(&conn).map_err(|message| {
        warn!("event=ffi_call module=ffi status=error call={call}");
        format!("{call} failed: {message}")
    })
}

fn key_states() -> Arc<KeyStates> {
    Arc::clone(KEY_STATES.get_or_init(|| Arc::new(KeyStates::new())))
}

fn orchestrator(conn: &Connection) -> Orchestrator<'_> {
    SyncOrchestrator::with_key_states(
        CacheStore::new(SqliteCacheRepository::new(conn), SystemClock),
        key_states(),
    )
}

fn ledger(conn: &Connection) -> VoteLedger<SqliteRatingRepository<'_>, SystemClock> {
    VoteLedger::new(
        SqliteRatingRepository::new(conn),
        SystemClock,
        CoreConfig::default().ledger_mode,
    )
}

fn with_schedule_service<T>(
    call: &str,
    body: Option<String>,
    f: impl FnOnce(&ScheduleService<'_, SqliteCacheRepository<'_>, SystemClock, ProvidedBody>) -> T,
) -> T
where
    T: From<SyncResponse>,
{
    let result = with_conn(call, |conn| {
        let orchestrator = orchestrator(conn);
        let service = ScheduleService::new(&orchestrator, ProvidedBody(body), CoreConfig::default());
        Ok(f(&service))
    });
    result.unwrap_or_else(|message| {
        T::from(SyncResponse {
            status: "offline".to_string(),
            source: "fallback".to_string(),
            notice: message,
        })
    })
}

impl From<SyncResponse> for CatalogResponse {
    fn from(sync: SyncResponse) -> Self {
        Self {
            sync,
            items: Vec::new(),
        }
    }
}

fn sync_response<T>(outcome: &SyncOutcome<T>) -> SyncResponse {
    let status = match outcome.status {
        mptapp_core::SyncStatus::Fresh => "fresh",
        mptapp_core::SyncStatus::Updated => "updated",
        mptapp_core::SyncStatus::StaleButUsable => "stale_but_usable",
        mptapp_core::SyncStatus::Offline => "offline",
        mptapp_core::SyncStatus::InFlight => "in_flight",
        mptapp_core::SyncStatus::Superseded => "superseded",
    };
    let source = match outcome.source {
        mptapp_core::ValueSource::Cache => "cache",
        mptapp_core::ValueSource::Network => "network",
        mptapp_core::ValueSource::Fallback => "fallback",
    };
    let notice = if outcome.status == mptapp_core::SyncStatus::Offline {
        "Нет подключения. Показаны сохранённые данные.".to_string()
    } else {
        String::new()
    };
    SyncResponse {
        status: status.to_string(),
        source: source.to_string(),
        notice,
    }
}

fn resource_key(kind: &str, scope: Option<String>) -> Option<ResourceKey> {
    let kind = parse_resource_kind(kind)?;
    Some(match scope {
        Some(scope) => ResourceKey::scoped(kind, scope),
        None => ResourceKey::global(kind),
    })
}

fn parse_resource_kind(value: &str) -> Option<ResourceKind> {
    [
        ResourceKind::WeekInfo,
        ResourceKind::Specialties,
        ResourceKind::Groups,
        ResourceKind::Schedule,
        ResourceKind::Replacements,
        ResourceKind::ContentVersion,
        ResourceKind::News,
    ]
    .into_iter()
    .find(|kind| kind.as_str() == value.trim())
}

fn voting_status_at(now: chrono::NaiveDateTime) -> VotingStatusResponse {
    match window_at(now) {
        VotingWindow::Open { closes_at } => VotingStatusResponse {
            is_open: true,
            boundary: closes_at.format(DATE_TIME_FORMAT).to_string(),
        },
        VotingWindow::Closed { reopens_at } => VotingStatusResponse {
            is_open: false,
            boundary: reopens_at.format(DATE_TIME_FORMAT).to_string(),
        },
    }
}

fn vote_call(
    call: &str,
    f: impl FnOnce(
        &VoteLedger<SqliteRatingRepository<'_>, SystemClock>,
    ) -> Result<Option<TeacherRating>, VoteError>,
) -> VoteResponse {
    let conn = match open_db(resolve_db_path()) {
        Ok(conn) => conn,
        Err(err) => return vote_failure(format!("{call} failed: {err}"), false),
    };
    let ledger = ledger(&conn);
    match f(&ledger) {
        Ok(rating) => {
            let rating = rating.map(|rating| {
                let vote = ledger
                    .current_vote(&rating.teacher_name, LOCAL_VOTER_ID)
                    .ok()
                    .flatten();
                rating_item(&rating, vote.map(|kind| kind.as_str().to_string()))
            });
            VoteResponse {
                ok: true,
                voting_closed: false,
                rating,
                message: String::new(),
            }
        }
        Err(VoteError::VotingClosed { reopens_at }) => vote_failure(
            format!(
                "Голосование откроется {}",
                reopens_at.format(DATE_TIME_FORMAT)
            ),
            true,
        ),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error call={call}");
            vote_failure(format!("{call} failed: {err}"), false)
        }
    }
}

fn vote_failure(message: String, voting_closed: bool) -> VoteResponse {
    VoteResponse {
        ok: false,
        voting_closed,
        rating: None,
        message,
    }
}

fn day_failure(date: String, message: String) -> DayScheduleResponse {
    DayScheduleResponse {
        ok: false,
        date,
        is_day_off: false,
        lessons: Vec::new(),
        replacements: Vec::new(),
        message,
    }
}

fn homework_failure(message: String) -> HomeworkResponse {
    HomeworkResponse {
        ok: false,
        item: None,
        message,
    }
}

fn lesson_item(lesson: &ProjectedLesson) -> LessonItem {
    let slot = &lesson.slot;
    LessonItem {
        identity: lesson.identity.to_string(),
        secondary_identity: lesson.secondary_identity.map(|id| id.to_string()),
        slot_number: slot.slot_number,
        subject: slot.subject_primary.clone(),
        teacher: slot.teacher_primary.clone(),
        subject_secondary: slot.subject_secondary.clone(),
        teacher_secondary: slot.teacher_secondary.clone(),
        campus: slot.campus.clone(),
        start_time: slot.start_time.clone(),
        end_time: slot.end_time.clone(),
    }
}

fn replacement_item(entry: &ReplacementEntry) -> ReplacementItem {
    ReplacementItem {
        slot_number: entry.slot_number,
        original_subject: entry.original_subject.clone(),
        new_subject: entry.new_subject.clone(),
        added_at: entry.added_at.clone(),
        is_cancellation: entry.is_cancellation(),
        is_transfer: entry.is_transfer(),
    }
}

fn specialty_item(specialty: Specialty) -> CatalogItem {
    CatalogItem {
        id: specialty.id,
        name: specialty.name,
        parent_id: None,
    }
}

fn group_item(group: Group) -> CatalogItem {
    CatalogItem {
        id: group.id,
        name: group.name,
        parent_id: Some(group.specialty_id),
    }
}

fn rating_item(rating: &TeacherRating, user_vote: Option<String>) -> RatingItem {
    RatingItem {
        teacher_name: rating.teacher_name.clone(),
        likes: rating.likes,
        neutrals: rating.neutrals,
        dislikes: rating.dislikes,
        positive_percent: rating.positive_percent(),
        user_vote,
    }
}

fn user_vote(votes: &[(String, VoteKind)], teacher_name: &str) -> Option<String> {
    votes
        .iter()
        .find(|(name, _)| name == teacher_name)
        .map(|(_, kind)| kind.as_str().to_string())
}

fn homework_item(record: &HomeworkRecord) -> HomeworkItem {
    HomeworkItem {
        lesson_identity: record.lesson_id.to_string(),
        title: record.title.clone(),
        notes: record.notes.clone(),
        due_date: record.due_date.format(DATE_FORMAT).to_string(),
        should_remind: record.should_remind,
        is_completed: record.is_completed,
    }
}
