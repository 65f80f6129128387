//! # orgwalk-core
//!
//! Foundation crate for the orgwalk directory client.
//! Defines the org data model, errors, config, search filters, constants,
//! and the traits at the transport and collaborator seams.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::OrgWalkConfig;
pub use errors::{OrgWalkError, OrgWalkResult, TransportError};
pub use models::{Entity, FieldDescriptor, Schema, SearchPage, SubtreeResult, TraversalStats};
