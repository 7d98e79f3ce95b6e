//! Schedule decoding, projection and bundled defaults.

pub mod api;
pub mod fallback;
pub mod projector;
pub mod teachers;
