//! # orgwalk-observability
//!
//! Subscriber setup and the structured events the directory client emits.

pub mod tracing_setup;

pub use tracing_setup::events;
pub use tracing_setup::{init_tracing, init_tracing_with_filter, LOG_ENV_VAR};
