#[cfg(feature = "api")]
pub mod client;
pub mod error;
pub mod query;
pub mod trend;
