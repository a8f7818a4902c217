//! API request handlers.

/// Agent listing.
pub mod agents;
/// Planner and direct-agent requests.
pub mod ask;
/// Health, connection test and welcome document.
pub mod system;
