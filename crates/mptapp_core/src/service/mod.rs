//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate sync, projection and repository calls into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage and transport details.

pub mod content_service;
pub mod homework_service;
pub mod schedule_service;
