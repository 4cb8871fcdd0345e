//! Cascading filter state machine for the yield dashboard.
//!
//! The cascade owns four dependent selection stages (date range, station,
//! recipe, lot) and keeps them consistent as the user narrows a query.
//! It performs no I/O: trigger and apply methods describe the next network
//! call for the adapter (WASM fetch or native reqwest) to issue.

pub mod cascade;
pub mod stage;

pub use cascade::{CascadeError, FetchPlan, FetchRequest, FilterCascade};
pub use stage::Stage;
