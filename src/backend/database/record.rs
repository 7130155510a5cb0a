/**
 * Records, Filters and Pagination
 *
 * A record is a JSON object of domain fields plus three keys the data-access
 * layer owns: `id`, `created_at` and `updated_at`. Domain code never sets
 * those keys; they are stripped on the way in and merged back on the way out.
 */

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field map stored for a record
pub type Document = Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

const RESERVED_FIELDS: [&str; 3] = [ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD];

/// Default page size for `find_many`
pub const DEFAULT_LIMIT: u64 = 100;

/// Upper bound on any page size
pub const MAX_LIMIT: u64 = 1000;

/// A persisted record as seen above the store adapter
///
/// The identifier is the opaque string form used at the API boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub fields: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Flatten into a single JSON object including the reserved keys
    pub fn into_document(self) -> Document {
        let mut doc = self.fields;
        doc.insert(ID_FIELD.to_string(), Value::String(self.id));
        doc.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(self.created_at.to_rfc3339()),
        );
        doc.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::String(self.updated_at.to_rfc3339()),
        );
        doc
    }

    /// Decode into a typed entity
    pub fn into_entity<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.into_document()))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.clone().into_document().serialize(serializer)
    }
}

/// Serialize a typed value into a document
///
/// Fails if the value does not serialize to a JSON object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => Ok(doc),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Drop the keys owned by the data-access layer
pub fn strip_reserved(doc: &mut Document) {
    for key in RESERVED_FIELDS {
        doc.remove(key);
    }
}

/// Whether a field name is usable in filters, updates and indexes
pub fn is_plain_field(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field-equality constraints, all of which must hold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    constraints: BTreeMap<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality constraint
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.constraints.iter()
    }

    /// Every field name is a plain identifier
    pub fn is_well_formed(&self) -> bool {
        self.constraints.keys().all(|k| is_plain_field(k))
    }

    /// Evaluate against a record's fields
    ///
    /// A `null` constraint matches a missing field as well as an explicit null.
    pub fn matches(&self, doc: &Document) -> bool {
        self.constraints.iter().all(|(field, expected)| match doc.get(field) {
            Some(actual) => values_equal(actual, expected),
            None => expected.is_null(),
        })
    }
}

/// JSON equality that treats `1` and `1.0` as the same number
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Filter::new(), |filter, (k, v)| filter.eq(k, v))
    }
}

/// Skip/limit window with defaults applied and the limit clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
