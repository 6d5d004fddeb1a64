//! DTOs for the AWX execution environment API.
//!
//! # Design
//! Reads are strongly typed (`ExecutionEnvironment`), writes are a sparse
//! `Fields` mapping so partial updates only carry the keys the caller sets.
//! Every read field defaults when absent: AWX often answers a DELETE with an
//! empty body, which decodes to `ExecutionEnvironment::default()`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};

/// Query parameters, passed through verbatim.
pub type QueryParams = BTreeMap<String, String>;

/// A write payload: field name to value.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single value in a write payload.
///
/// NaN and infinities have no JSON form and fail serialization instead of
/// being sent as `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Map(BTreeMap<String, FieldValue>),
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(value) => serializer.serialize_bool(*value),
            FieldValue::Integer(value) => serializer.serialize_i64(*value),
            FieldValue::Float(value) if value.is_finite() => serializer.serialize_f64(*value),
            FieldValue::Float(value) => Err(S::Error::custom(format!(
                "non-finite float {value} cannot be encoded"
            ))),
            FieldValue::String(value) => serializer.serialize_str(value),
            FieldValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// An execution environment as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionEnvironment {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub related: serde_json::Map<String, serde_json::Value>,
    pub summary_fields: serde_json::Map<String, serde_json::Value>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub name: String,
    pub description: String,
    pub organization: Option<i64>,
    pub image: String,
    pub managed: bool,
    pub credential: Option<i64>,
    /// Pull policy: `""`, `"always"`, `"missing"` or `"never"`.
    pub pull: String,
}

/// Pagination metadata shared by every AWX list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Page envelope returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListExecutionEnvironmentsResponse {
    #[serde(flatten)]
    pub pagination: Pagination,
    #[serde(default)]
    pub results: Vec<ExecutionEnvironment>,
}
