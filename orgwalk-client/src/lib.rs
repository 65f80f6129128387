//! # orgwalk-client
//!
//! Client-side engine for querying a remote organizational directory over HTTP.
//! A retrying transport sits at the bottom; on top of it a cursor-following
//! paginator, a TTL schema cache, record and chain resolvers, and the bounded
//! breadth-first subtree walker. `OrgDirectoryClient` ties them together behind
//! `IOrgDirectory`.

pub mod cache;
pub mod endpoints;
pub mod engine;
pub mod media;
pub mod pagination;
pub mod resolver;
pub mod search;
pub mod transport;
pub mod traversal;

pub use cache::SchemaCache;
pub use endpoints::Endpoints;
pub use engine::OrgDirectoryClient;
pub use media::MediaUrlBuilder;
pub use pagination::Paginator;
pub use resolver::{ChainResolver, RecordResolver};
pub use search::SearchClient;
pub use transport::{HttpClient, ReqwestSender, RetryPolicy, TransportStats};
pub use traversal::SubtreeWalker;
