//! A person record in the organizational directory.
//!
//! Core attributes are strongly typed. Organization-defined attributes land in
//! `attributes` untouched, so unknown keys survive a read/serialize cycle.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A person in the org.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Stable opaque identifier.
    pub id: String,
    /// Alternate lookup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Identifier of the immediate superior. `None` at the org root.
    #[serde(default, alias = "superiorId")]
    pub manager_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub direct_report_count: u32,
    /// Transitive subordinate count.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_report_count: u32,
    /// Superior ids from the org root down to the immediate superior.
    #[serde(default, deserialize_with = "lenient_path")]
    pub reporting_path: Vec<String>,
    /// Organization-defined attributes, passed through opaquely.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            name: name.into(),
            title: None,
            manager_id: None,
            direct_report_count: 0,
            total_report_count: 0,
            reporting_path: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Whether expanding this entity could yield any subordinates.
    pub fn has_direct_reports(&self) -> bool {
        self.direct_report_count > 0
    }

    /// Look up an organization-defined attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Look up an organization-defined attribute as a string.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(Value::as_str)
    }

    /// Last element of the reporting path, if any.
    pub fn path_superior(&self) -> Option<&str> {
        self.reporting_path.last().map(String::as_str)
    }

    /// Whether `reporting_path` agrees with `manager_id`.
    ///
    /// The service does not guarantee this; callers decide what to do about it.
    pub fn path_is_consistent(&self) -> bool {
        match (self.manager_id.as_deref(), self.path_superior()) {
            (Some(manager), Some(last)) => manager == last,
            (None, None) => true,
            _ => false,
        }
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts arrive as numbers, numeric strings, or null depending on the tenant.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

fn count_from_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .map(|n| n.min(u64::from(u32::MAX)) as u32)
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn lenient_path<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(path_from_value(&value))
}

/// Malformed paths read as empty rather than failing the whole record.
pub(crate) fn path_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) => s
            .split([',', '/'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
