//! Teacher rating counters and the per-voter vote transition rules.
//!
//! # Responsibility
//! - Hold aggregate like/neutral/dislike counters for one teacher.
//! - Apply cast/retract transitions without double counting.
//!
//! # Invariants
//! - Counters are unsigned; decrements floor at zero.
//! - In `LedgerMode::Idempotent`, a cast always retracts the voter's previous
//!   vote first, even when the kind is unchanged.

use serde::{Deserialize, Serialize};

/// A single voter's opinion of a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
    Like,
    Neutral,
    Dislike,
}

impl VoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Neutral => "neutral",
            Self::Dislike => "dislike",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(Self::Like),
            "neutral" => Some(Self::Neutral),
            "dislike" => Some(Self::Dislike),
            _ => None,
        }
    }
}

/// How casts interact with a voter's previous vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerMode {
    /// At most one counted vote per voter and teacher.
    #[default]
    Idempotent,
    /// Every cast adds a vote; retract only clears the voter marker.
    Accumulating,
}

/// Aggregate counters for one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRating {
    pub teacher_name: String,
    pub likes: u32,
    pub neutrals: u32,
    pub dislikes: u32,
}

impl TeacherRating {
    pub fn new(teacher_name: impl Into<String>) -> Self {
        Self {
            teacher_name: teacher_name.into(),
            likes: 0,
            neutrals: 0,
            dislikes: 0,
        }
    }

    /// Saturates at `u32::MAX`.
    pub fn total_votes(&self) -> u32 {
        self.likes
            .saturating_add(self.neutrals)
            .saturating_add(self.dislikes)
    }

    /// `likes - dislikes`; zero when nobody voted.
    pub fn sort_score(&self) -> i64 {
        i64::from(self.likes) - i64::from(self.dislikes)
    }

    /// Likes count 1, neutrals 0.5; 0.5 when nobody voted.
    pub fn score(&self) -> f64 {
        let total = self.exact_total();
        if total == 0 {
            return 0.5;
        }
        (f64::from(self.likes) + f64::from(self.neutrals) * 0.5) / total as f64
    }

    /// Share of likes in percent, rounded down; 50 when nobody voted.
    pub fn positive_percent(&self) -> u32 {
        let total = self.exact_total();
        if total == 0 {
            return 50;
        }
        let percent = u64::from(self.likes) * 100 / total;
        u32::try_from(percent).unwrap_or(100)
    }

    fn exact_total(&self) -> u64 {
        u64::from(self.likes) + u64::from(self.neutrals) + u64::from(self.dislikes)
    }

    fn counter_mut(&mut self, kind: VoteKind) -> &mut u32 {
        match kind {
            VoteKind::Like => &mut self.likes,
            VoteKind::Neutral => &mut self.neutrals,
            VoteKind::Dislike => &mut self.dislikes,
        }
    }

    fn increment(&mut self, kind: VoteKind) {
        let counter = self.counter_mut(kind);
        *counter = counter.saturating_add(1);
    }

    fn decrement(&mut self, kind: VoteKind) {
        let counter = self.counter_mut(kind);
        *counter = counter.saturating_sub(1);
    }

    /// Applies a cast of `next` by a voter whose current vote is `previous`.
    pub fn apply_cast(&mut self, previous: Option<VoteKind>, next: VoteKind, mode: LedgerMode) {
        if mode == LedgerMode::Idempotent {
            if let Some(previous) = previous {
                self.decrement(previous);
            }
        }
        self.increment(next);
    }

    /// Applies a retract by a voter whose current vote is `previous`.
    pub fn apply_retract(&mut self, previous: Option<VoteKind>, mode: LedgerMode) {
        if mode == LedgerMode::Idempotent {
            if let Some(previous) = previous {
                self.decrement(previous);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LedgerMode, TeacherRating, VoteKind};

    #[test]
    fn recasting_same_kind_keeps_counters_unchanged() {
        let mut rating = TeacherRating::new("Д.Д. Голубев");
        rating.apply_cast(None, VoteKind::Like, LedgerMode::Idempotent);
        rating.apply_cast(Some(VoteKind::Like), VoteKind::Like, LedgerMode::Idempotent);
        assert_eq!((rating.likes, rating.neutrals, rating.dislikes), (1, 0, 0));
    }

    #[test]
    fn switching_kind_moves_one_vote() {
        let mut rating = TeacherRating::new("Д.Д. Голубев");
        rating.apply_cast(None, VoteKind::Like, LedgerMode::Idempotent);
        rating.apply_cast(Some(VoteKind::Like), VoteKind::Dislike, LedgerMode::Idempotent);
        assert_eq!((rating.likes, rating.dislikes), (0, 1));
        assert_eq!(rating.total_votes(), 1);
    }

    #[test]
    fn saturated_counters_keep_percent_in_range() {
        let mut rating = TeacherRating::new("А.А. Морозов");
        rating.likes = u32::MAX;
        rating.neutrals = u32::MAX;
        rating.dislikes = 1;
        assert_eq!(rating.total_votes(), u32::MAX);
        assert_eq!(rating.positive_percent(), 49);
        assert!((rating.score() - 0.75).abs() < 1e-6);

        rating.neutrals = 0;
        rating.dislikes = 0;
        assert_eq!(rating.positive_percent(), 100);
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut rating = TeacherRating::new("Л.В. Дробышева");
        rating.apply_retract(Some(VoteKind::Neutral), LedgerMode::Idempotent);
        assert_eq!(rating.neutrals, 0);
    }

    #[test]
    fn accumulating_mode_never_retracts() {
        let mut rating = TeacherRating::new("Л.В. Дробышева");
        rating.apply_cast(None, VoteKind::Like, LedgerMode::Accumulating);
        rating.apply_cast(Some(VoteKind::Like), VoteKind::Like, LedgerMode::Accumulating);
        rating.apply_retract(Some(VoteKind::Like), LedgerMode::Accumulating);
        assert_eq!(rating.likes, 2);
    }

    #[test]
    fn derived_scores_have_neutral_defaults() {
        let mut rating = TeacherRating::new("А.А. Сердцева");
        assert_eq!(rating.sort_score(), 0);
        assert_eq!(rating.positive_percent(), 50);
        assert!((rating.score() - 0.5).abs() < f64::EPSILON);

        rating.likes = 2;
        rating.neutrals = 1;
        rating.dislikes = 1;
        assert_eq!(rating.sort_score(), 1);
        assert_eq!(rating.positive_percent(), 50);
        assert!((rating.score() - 0.625).abs() < f64::EPSILON);
    }

    #[test]
    fn vote_kind_round_trips_through_storage_strings() {
        for kind in [VoteKind::Like, VoteKind::Neutral, VoteKind::Dislike] {
            assert_eq!(VoteKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(VoteKind::parse("love"), None);
    }
}
