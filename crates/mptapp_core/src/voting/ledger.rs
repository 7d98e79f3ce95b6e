//! Teacher vote ledger.
//!
//! # Responsibility
//! - Gate every mutation on the voting window evaluated at call time.
//! - Delegate counter and voter-map updates to one repository transaction.
//!
//! # Invariants
//! - Counters never go negative.
//! - In idempotent mode a voter contributes at most one vote per teacher.
//! - Retracting without a current vote is a no-op.

use crate::clock::Clock;
use crate::model::rating::{LedgerMode, TeacherRating, VoteKind};
use crate::repo::rating_repo::RatingRepository;
use crate::repo::RepoError;
use crate::voting::window::{window_at, VotingWindow};
use chrono::NaiveDateTime;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type VoteResult<T> = Result<T, VoteError>;

#[derive(Debug)]
pub enum VoteError {
    /// Mutation attempted outside the voting window.
    VotingClosed { reopens_at: NaiveDateTime },
    /// Teacher name is empty after trimming.
    EmptySubject,
    Repo(RepoError),
}

impl Display for VoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VotingClosed { reopens_at } => {
                write!(f, "voting is closed until {}", reopens_at.format("%Y-%m-%d %H:%M"))
            }
            Self::EmptySubject => write!(f, "teacher name cannot be empty"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for VoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for VoteError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Vote use-cases over a [`RatingRepository`].
pub struct VoteLedger<R: RatingRepository, C: Clock> {
    repo: R,
    clock: C,
    mode: LedgerMode,
}

impl<R: RatingRepository, C: Clock> VoteLedger<R, C> {
    pub fn new(repo: R, clock: C, mode: LedgerMode) -> Self {
        Self { repo, clock, mode }
    }

    pub fn mode(&self) -> LedgerMode {
        self.mode
    }

    pub fn window(&self) -> VotingWindow {
        window_at(self.clock.now_local())
    }

    /// Records `kind` as the voter's current vote for `teacher_name`.
    pub fn cast_vote(
        &self,
        teacher_name: &str,
        voter_id: &str,
        kind: VoteKind,
    ) -> VoteResult<TeacherRating> {
        let teacher_name = normalize_subject(teacher_name)?;
        self.ensure_open()?;

        let rating = self.repo.record_cast(
            teacher_name,
            voter_id,
            kind,
            self.mode,
            self.clock.now_millis(),
        )?;
        info!(
            "event=vote_cast module=voting status=ok kind={} mode={:?}",
            kind.as_str(),
            self.mode
        );
        Ok(rating)
    }

    /// Clears the voter's current vote. Returns `None` for unknown teachers.
    pub fn retract_vote(
        &self,
        teacher_name: &str,
        voter_id: &str,
    ) -> VoteResult<Option<TeacherRating>> {
        let teacher_name = normalize_subject(teacher_name)?;
        self.ensure_open()?;

        let rating = self.repo.record_retract(teacher_name, voter_id, self.mode)?;
        info!(
            "event=vote_retract module=voting status=ok found={}",
            rating.is_some()
        );
        Ok(rating)
    }

    /// Adds rating rows for names not seen before, preserving order.
    pub fn ensure_subjects(&self, teacher_names: &[String]) -> VoteResult<usize> {
        let names: Vec<String> = teacher_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        let added = self.repo.insert_missing(&names)?;
        if added > 0 {
            info!("event=rating_subjects module=voting status=ok added={added}");
        }
        Ok(added)
    }

    pub fn ratings(&self) -> VoteResult<Vec<TeacherRating>> {
        Ok(self.repo.list_ratings()?)
    }

    pub fn rating(&self, teacher_name: &str) -> VoteResult<Option<TeacherRating>> {
        Ok(self.repo.get_rating(teacher_name.trim())?)
    }

    pub fn current_vote(&self, teacher_name: &str, voter_id: &str) -> VoteResult<Option<VoteKind>> {
        Ok(self.repo.current_vote(teacher_name.trim(), voter_id)?)
    }

    pub fn votes_of(&self, voter_id: &str) -> VoteResult<Vec<(String, VoteKind)>> {
        Ok(self.repo.votes_of(voter_id)?)
    }

    /// Administrative reset; not gated by the voting window.
    pub fn reset_all(&self) -> VoteResult<()> {
        self.repo.reset_all()?;
        info!("event=rating_reset module=voting status=ok");
        Ok(())
    }

    fn ensure_open(&self) -> VoteResult<()> {
        match self.window() {
            VotingWindow::Open { .. } => Ok(()),
            VotingWindow::Closed { reopens_at } => {
                info!("event=vote_rejected module=voting status=closed");
                Err(VoteError::VotingClosed { reopens_at })
            }
        }
    }
}

fn normalize_subject(teacher_name: &str) -> VoteResult<&str> {
    let trimmed = teacher_name.trim();
    if trimmed.is_empty() {
        return Err(VoteError::EmptySubject);
    }
    Ok(trimmed)
}
