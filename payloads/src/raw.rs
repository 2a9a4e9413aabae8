//! Backend rows as they arrive, before normalization.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::RecordId;

/// Keys checked for an identity in create responses, after the entity's own.
const ECHO_ID_KEYS: &[&str] = &["id", "insertId", "insert_id"];

/// A JSON object exactly as returned by a list endpoint.
///
/// Field lookups take an ordered list of candidate keys and return the
/// first non-null value, coerced leniently. The backend is inconsistent
/// about types (`"12"` vs `12`, `1` vs `true`), so coercion never fails: a
/// value that cannot be read as the requested type is treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// View an already-normalized record as raw input again.
    pub fn from_serialize(record: &impl Serialize) -> Self {
        match serde_json::to_value(record) {
            Ok(Value::Object(map)) => Self(map),
            _ => Self::default(),
        }
    }

    /// Split a list response into rows. Accepts a bare array or an object
    /// wrapping the array under `data`. Non-object elements are skipped.
    pub fn list_from(body: Value) -> Option<Vec<RawRecord>> {
        let rows = match body {
            Value::Array(rows) => rows,
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(rows)) => rows,
                _ => return None,
            },
            _ => return None,
        };
        Some(
            rows.into_iter()
                .filter_map(|row| match row {
                    Value::Object(map) => Some(Self(map)),
                    _ => None,
                })
                .collect(),
        )
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`RawRecord::insert`].
    pub fn with(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.insert(key, value);
        self
    }

    /// Shallow merge: every key in `other` replaces the key in `self`.
    pub fn overlay(&mut self, other: RawRecord) {
        self.0.extend(other.0);
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// First non-null value among `keys`.
    pub fn get(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn text(&self, keys: &[&str]) -> Option<String> {
        match self.get(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn text_or(&self, keys: &[&str], default: &str) -> String {
        self.text(keys).unwrap_or_else(|| default.to_string())
    }

    /// Text that is only meaningful when non-blank (dates, urls, names of
    /// optional relations).
    pub fn non_empty(&self, keys: &[&str]) -> Option<String> {
        self.text(keys).filter(|s| !s.trim().is_empty())
    }

    pub fn integer(&self, keys: &[&str]) -> Option<i64> {
        match self.get(keys)? {
            Value::Number(n) => {
                n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))
            }
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
            }
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn id(&self, keys: &[&str]) -> Option<RecordId> {
        self.integer(keys).map(RecordId)
    }

    pub fn decimal(&self, keys: &[&str]) -> Option<Decimal> {
        let text = match self.get(keys)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            _ => return None,
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    pub fn flag(&self, keys: &[&str]) -> Option<bool> {
        match self.get(keys)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "active" => Some(true),
                "0" | "false" | "no" | "inactive" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Status labels arrive either as text or as an active flag.
    pub fn status_or(&self, keys: &[&str], default: &str) -> String {
        match self.get(keys) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Bool(_) | Value::Number(_)) => {
                match self.flag(keys) {
                    Some(true) => "Active".to_string(),
                    Some(false) => "Inactive".to_string(),
                    None => default.to_string(),
                }
            }
            _ => default.to_string(),
        }
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The body of a successful create call.
///
/// Create endpoints answer with anything from `{"id": 4}` to
/// `{"data": {"insertId": 4}}` to a bare message. Implementations of
/// multi-step creates may also stash identities they learned along the way
/// in `carried`, so they end up in the synthesized record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Echo {
    pub body: Value,
    pub carried: RawRecord,
}

impl Echo {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            carried: RawRecord::default(),
        }
    }

    pub fn carry(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.carried.insert(key, value);
        self
    }

    /// Find the identity assigned by the server, looking at `keys` first and
    /// then at the generic id keys, at the top level and under `data`.
    pub fn id(&self, keys: &[&str]) -> Option<RecordId> {
        let candidates: Vec<&str> =
            keys.iter().chain(ECHO_ID_KEYS).copied().collect();
        match &self.body {
            Value::Number(n) => n.as_i64().map(RecordId),
            Value::Object(map) => {
                let top = RawRecord(map.clone());
                top.id(&candidates).or_else(|| match map.get("data") {
                    Some(Value::Object(data)) => {
                        RawRecord(data.clone()).id(&candidates)
                    }
                    _ => None,
                })
            }
            _ => None,
        }
    }
}
