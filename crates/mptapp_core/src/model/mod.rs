//! Domain model for schedule projection, caching and ratings.
//!
//! # Responsibility
//! - Define canonical data structures shared by projection, sync and ledger
//!   code.
//! - Keep identity derivation pure and free of storage concerns.
//!
//! # Invariants
//! - Lessons are identified by derived `LessonIdentity` values, never by
//!   random IDs.
//! - Template data is date-free; dates are bound only during projection.

pub mod catalog;
pub mod homework;
pub mod identity;
pub mod lesson;
pub mod news;
pub mod rating;
pub mod schedule;
