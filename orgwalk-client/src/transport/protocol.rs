//! Wire envelope shared by the entity and schema endpoints.

use serde::{Deserialize, Serialize};

/// `{"data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}
