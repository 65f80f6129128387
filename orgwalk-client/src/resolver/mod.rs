//! Entity lookups: single records, one-hop subordinates, and reporting chains.

pub mod chain;
pub mod records;

pub use chain::ChainResolver;
pub use records::RecordResolver;
