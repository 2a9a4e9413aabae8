//! Request bodies for create and update calls.
//!
//! A form is sent as JSON unless it carries a freshly selected file, in
//! which case it becomes `multipart/form-data`. Previously stored image
//! URLs never force multipart.

use reqwest::multipart;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use crate::{ClientError, RawRecord, RecordId};

/// A file picked by the admin, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// URL of an image the backend already has.
    Stored(String),
    Upload(Upload),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Flag(bool),
    Image(ImageSource),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FormValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<RecordId> for FormValue {
    fn from(value: RecordId) -> Self {
        Self::Integer(value.0)
    }
}

impl From<Decimal> for FormValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<ImageSource> for FormValue {
    fn from(value: ImageSource) -> Self {
        Self::Image(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// Ordered `(backend field name, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(String, FormValue)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<FormValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Add the field only when a value is present. Used by patches, which
    /// carry just the changed fields.
    pub fn opt<V: Into<FormValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    /// Insert or replace a field, keeping its original position.
    pub fn set(&mut self, key: &str, value: impl Into<FormValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Move the fields named in `keys` into a new form.
    pub fn split_off(&mut self, keys: &[&str]) -> Form {
        let (taken, kept) = std::mem::take(&mut self.fields)
            .into_iter()
            .partition(|(k, _)| keys.contains(&k.as_str()));
        self.fields = kept;
        Form { fields: taken }
    }

    /// Append every field of `other`, replacing duplicates.
    pub fn merge(&mut self, other: Form) {
        for (key, value) in other.fields {
            self.set(&key, value);
        }
    }

    pub fn has_upload(&self) -> bool {
        self.fields.iter().any(|(_, v)| {
            matches!(v, FormValue::Image(ImageSource::Upload(_)))
        })
    }

    pub fn encoding(&self) -> Encoding {
        if self.has_upload() {
            Encoding::Multipart
        } else {
            Encoding::Json
        }
    }

    /// JSON body. Uploads cannot be represented and are left out; callers
    /// pick multipart for those (see [`Form::encoding`]).
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .filter_map(|(key, value)| Some((key.clone(), json_value(value)?)))
            .collect();
        Value::Object(map)
    }

    /// Multipart body. Flags travel as `"1"`/`"0"`, stored images as their
    /// URL, uploads as file parts.
    pub fn to_multipart(&self) -> Result<multipart::Form, ClientError> {
        let mut form = multipart::Form::new();
        for (key, value) in &self.fields {
            form = match value {
                FormValue::Text(s) => form.text(key.clone(), s.clone()),
                FormValue::Integer(i) => form.text(key.clone(), i.to_string()),
                FormValue::Decimal(d) => form.text(key.clone(), d.to_string()),
                FormValue::Flag(b) => {
                    form.text(key.clone(), if *b { "1" } else { "0" })
                }
                FormValue::Image(ImageSource::Stored(url)) => {
                    form.text(key.clone(), url.clone())
                }
                FormValue::Image(ImageSource::Upload(upload)) => {
                    let part = multipart::Part::bytes(upload.bytes.clone())
                        .file_name(upload.file_name.clone())
                        .mime_str(&upload.mime)
                        .map_err(|e| {
                            ClientError::Upload(format!(
                                "{}: {e}",
                                upload.file_name
                            ))
                        })?;
                    form.part(key.clone(), part)
                }
            };
        }
        Ok(form)
    }

    /// The values this form would set, as a raw record. A new upload has no
    /// known URL yet, so it reads as null.
    pub fn to_raw(&self) -> RawRecord {
        let mut raw = RawRecord::new();
        for (key, value) in &self.fields {
            raw.insert(key.clone(), json_value(value).unwrap_or(Value::Null));
        }
        raw
    }
}

fn json_value(value: &FormValue) -> Option<Value> {
    Some(match value {
        FormValue::Text(s) => Value::String(s.clone()),
        FormValue::Integer(i) => Value::from(*i),
        FormValue::Decimal(d) => decimal_to_json(d),
        FormValue::Flag(b) => Value::Bool(*b),
        FormValue::Image(ImageSource::Stored(url)) => {
            Value::String(url.clone())
        }
        FormValue::Image(ImageSource::Upload(_)) => return None,
    })
}

fn decimal_to_json(d: &Decimal) -> Value {
    d.normalize()
        .to_string()
        .parse::<Number>()
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(d.to_string()))
}

/// Conversion of a typed draft or patch into the backend's field names.
pub trait ToForm {
    fn to_form(&self) -> Form;
}
