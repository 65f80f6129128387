//! Search request model: free-text queries and boolean filter expressions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::clamp_page_size;
use crate::constants::MAX_PAGE_SIZE;
use crate::errors::{OrgWalkError, OrgWalkResult};

/// Comparison applied by a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Set membership; the value must be an array.
    In,
    /// Field presence; the value is ignored.
    Exists,
    /// Substring containment.
    Contains,
}

/// `{field, comparator, value}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub comparator: Comparator,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
}

/// Boolean composition of conditions.
///
/// Serializes as `{"and": [...]}`, `{"or": [...]}`, `{"not": {...}}`, or a bare condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterExpr {
    And { and: Vec<FilterExpr> },
    Or { or: Vec<FilterExpr> },
    Not { not: Box<FilterExpr> },
    Condition(Condition),
}

impl FilterExpr {
    pub fn condition(field: impl Into<String>, comparator: Comparator, value: Value) -> Self {
        Self::Condition(Condition {
            field: field.into(),
            comparator,
            value,
        })
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, Comparator::Eq, value.into())
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, Comparator::Ne, value.into())
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, Comparator::Gt, value.into())
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, Comparator::Gte, value.into())
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, Comparator::Lt, value.into())
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::condition(field, Comparator::Lte, value.into())
    }

    pub fn is_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::condition(field, Comparator::In, Value::Array(values))
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::condition(field, Comparator::Exists, Value::Null)
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::condition(field, Comparator::Contains, Value::String(needle.into()))
    }

    pub fn and(exprs: Vec<FilterExpr>) -> Self {
        Self::And { and: exprs }
    }

    pub fn or(exprs: Vec<FilterExpr>) -> Self {
        Self::Or { or: exprs }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: FilterExpr) -> Self {
        Self::Not {
            not: Box::new(expr),
        }
    }

    /// Every leaf condition, depth first.
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        self.collect_conditions(&mut out);
        out
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        match self {
            Self::And { and: exprs } | Self::Or { or: exprs } => {
                for e in exprs {
                    e.collect_conditions(out);
                }
            }
            Self::Not { not } => not.collect_conditions(out),
            Self::Condition(c) => out.push(c),
        }
    }

    /// Structural checks that need no schema.
    pub fn validate(&self) -> OrgWalkResult<()> {
        match self {
            Self::And { and: exprs } | Self::Or { or: exprs } => {
                if exprs.is_empty() {
                    return Err(OrgWalkError::invalid_input(
                        "filter",
                        "boolean group must not be empty",
                    ));
                }
                exprs.iter().try_for_each(FilterExpr::validate)
            }
            Self::Not { not } => not.validate(),
            Self::Condition(c) => {
                if c.field.trim().is_empty() {
                    return Err(OrgWalkError::invalid_input("filter", "empty field name"));
                }
                match c.comparator {
                    Comparator::In if !c.value.is_array() => Err(OrgWalkError::invalid_input(
                        "filter",
                        format!("'in' on '{}' requires an array value", c.field),
                    )),
                    Comparator::Exists => Ok(()),
                    _ if c.value.is_null() => Err(OrgWalkError::invalid_input(
                        "filter",
                        format!("condition on '{}' is missing a value", c.field),
                    )),
                    _ => Ok(()),
                }
            }
        }
    }
}

/// Query-parameter search: free text plus field equality filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleSearch {
    pub query: Option<String>,
    pub filters: Vec<(String, String)>,
    pub page_size: u32,
}

impl SimpleSearch {
    pub fn new() -> Self {
        Self {
            query: None,
            filters: Vec::new(),
            page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn query(mut self, text: impl Into<String>) -> Self {
        self.query = Some(text.into());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Query pairs in wire order, page size clamped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        if let Some(q) = self.query.as_deref().filter(|q| !q.trim().is_empty()) {
            pairs.push(("q".to_string(), q.to_string()));
        }
        for (field, value) in &self.filters {
            pairs.push((format!("filter[{field}]"), value.clone()));
        }
        pairs.push((
            "page_size".to_string(),
            clamp_page_size(self.page_size).to_string(),
        ));
        pairs
    }
}

impl Default for SimpleSearch {
    fn default() -> Self {
        Self::new()
    }
}

/// Body-form search supporting boolean filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterExpr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub page_size: u32,
}

impl StructuredSearch {
    pub fn new() -> Self {
        Self {
            filter: None,
            query: None,
            page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn with_filter(mut self, filter: FilterExpr) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_query(mut self, text: impl Into<String>) -> Self {
        self.query = Some(text.into());
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Copy with the page size clamped, ready to send.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        out.page_size = clamp_page_size(self.page_size);
        out
    }

    pub fn validate(&self) -> OrgWalkResult<()> {
        match &self.filter {
            Some(filter) => filter.validate(),
            None => Ok(()),
        }
    }
}

impl Default for StructuredSearch {
    fn default() -> Self {
        Self::new()
    }
}
