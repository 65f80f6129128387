//! The org field schema.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::FilterExpr;
use crate::errors::{OrgWalkError, OrgWalkResult};

/// Declared type of an entity attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Email,
    Reference,
    List,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One schema entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Usable as an equality/range filter.
    #[serde(default)]
    pub filterable: bool,
    /// Participates in free-text search.
    #[serde(default)]
    pub searchable: bool,
}

/// All field descriptors of an org.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn filterable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.filterable)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.searchable)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reject filters that name unknown or non-filterable fields.
    pub fn validate_filter(&self, filter: &FilterExpr) -> OrgWalkResult<()> {
        for condition in filter.conditions() {
            match self.field(&condition.field) {
                None => {
                    return Err(OrgWalkError::invalid_input(
                        "filter",
                        format!("unknown field '{}'", condition.field),
                    ))
                }
                Some(descriptor) if !descriptor.filterable => {
                    return Err(OrgWalkError::invalid_input(
                        "filter",
                        format!("field '{}' is not filterable", condition.field),
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// A schema together with when it was fetched. Replaced wholesale, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaSnapshot {
    pub schema: Arc<Schema>,
    pub fetched_at: DateTime<Utc>,
}

impl SchemaSnapshot {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            fetched_at: Utc::now(),
        }
    }

    /// Age of the snapshot relative to `now`.
    pub fn age_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.fetched_at
    }
}
