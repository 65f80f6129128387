//! Read-only snapshots exchanged with the directory service.

pub mod entity;
pub mod field;
pub mod filter;
pub mod http;
pub mod media;
pub mod page;
pub mod subtree;

pub use entity::Entity;
pub use field::{FieldDescriptor, FieldType, Schema, SchemaSnapshot};
pub use filter::{Comparator, Condition, FilterExpr, SimpleSearch, StructuredSearch};
pub use http::{HttpMethod, HttpRequest, HttpResponse, SendError};
pub use media::{MediaKind, MediaRequest, MediaVariant};
pub use page::{PageLinks, PageMeta, SearchPage};
pub use subtree::{ReportingEdge, SubtreeResult, TraversalStats, WalkOptions};
