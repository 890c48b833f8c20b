pub mod admin_level;
pub mod query;

pub use admin_level::{AdminLevel, DEFAULT_LEVELS};
pub use query::{BoundaryQuery, DEFAULT_SERVER_TIMEOUT_SECS, QueryStyle};
