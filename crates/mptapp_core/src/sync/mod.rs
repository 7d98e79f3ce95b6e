//! Offline-first synchronization of remote schedule resources.

pub mod cache_store;
pub mod events;
pub mod orchestrator;
pub mod resource;
pub mod source;
