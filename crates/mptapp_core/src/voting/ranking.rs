//! Ranked views over a ratings snapshot.

use crate::model::rating::TeacherRating;
use std::collections::HashSet;

const TOP_COUNT: usize = 3;
const NEXT_COUNT: usize = 7;

/// Snapshot of ratings in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingBoard {
    ratings: Vec<TeacherRating>,
}

impl RatingBoard {
    pub fn new(ratings: Vec<TeacherRating>) -> Self {
        Self { ratings }
    }

    pub fn ratings(&self) -> &[TeacherRating] {
        &self.ratings
    }

    /// By `sort_score` descending; ties keep insertion order.
    pub fn sorted_by_best(&self) -> Vec<&TeacherRating> {
        let mut sorted: Vec<&TeacherRating> = self.ratings.iter().collect();
        sorted.sort_by(|a, b| b.sort_score().cmp(&a.sort_score()));
        sorted
    }

    /// Best `n` teachers that received at least one vote.
    pub fn top_with_votes(&self, n: usize) -> Vec<&TeacherRating> {
        self.voted_by_best().take(n).collect()
    }

    pub fn top3(&self) -> Vec<&TeacherRating> {
        self.top_with_votes(TOP_COUNT)
    }

    /// Ranks 4 through 10 among voted teachers.
    pub fn next7(&self) -> Vec<&TeacherRating> {
        self.voted_by_best().skip(TOP_COUNT).take(NEXT_COUNT).collect()
    }

    /// Teachers with any dislikes, most disliked first.
    pub fn worst(&self) -> Vec<&TeacherRating> {
        let mut worst: Vec<&TeacherRating> = self
            .ratings
            .iter()
            .filter(|rating| rating.dislikes > 0)
            .collect();
        worst.sort_by(|a, b| b.dislikes.cmp(&a.dislikes));
        worst
    }

    /// Everyone outside the top ten and the worst list, by name.
    pub fn middle(&self) -> Vec<&TeacherRating> {
        let excluded: HashSet<&str> = self
            .voted_by_best()
            .take(TOP_COUNT + NEXT_COUNT)
            .chain(self.worst())
            .map(|rating| rating.teacher_name.as_str())
            .collect();
        let mut middle: Vec<&TeacherRating> = self
            .ratings
            .iter()
            .filter(|rating| !excluded.contains(rating.teacher_name.as_str()))
            .collect();
        middle.sort_by(|a, b| a.teacher_name.cmp(&b.teacher_name));
        middle
    }

    fn voted_by_best(&self) -> impl Iterator<Item = &TeacherRating> {
        self.sorted_by_best()
            .into_iter()
            .filter(|rating| rating.total_votes() > 0)
    }
}
