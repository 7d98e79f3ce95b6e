//! Flutter-facing bindings for the MPTapp core.

pub mod api;
