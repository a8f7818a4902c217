//! External data collaborators used by the data-lookup agent

/// Weather, news and stock HTTP lookups.
pub mod live_data;

pub use live_data::{LiveDataClient, LiveDataKeys, LiveDataLookup};
