//! In-memory tables behind the stub routes.

use std::collections::{BTreeMap, VecDeque};
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde_json::{Map, Value};

/// Table name and primary key column for every collection the backend
/// serves.
pub const TABLES: &[(&str, &str)] = &[
    ("user", "id"),
    ("staff", "staff_id"),
    ("services", "service_id"),
    ("subservices", "sub_service_id"),
    ("booking", "book_id"),
    ("earning", "earning_id"),
    ("discount", "discount_id"),
    ("complaint", "complaint_id"),
    ("notification", "notification_id"),
    ("testimonial", "testimonial_id"),
    ("member", "member_id"),
    ("blog", "blog_id"),
    ("contact", "contact_id"),
    ("privacy", "privacy_id"),
    ("account_delete", "request_id"),
];

pub type Row = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown table {0}")]
    UnknownTable(String),
    #[error("No {table} row with id {id}")]
    RowNotFound { table: String, id: i64 },
    #[error("Request body has no id")]
    MissingId,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl Part {
    /// The value stored for this field: the text itself, or the URL the
    /// uploaded file would be served from.
    pub fn value(&self) -> Value {
        match &self.file_name {
            Some(file_name) => Value::String(format!("/uploads/{file_name}")),
            None => Value::String(self.text()),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

/// A request as the stub received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path below `/api/`, e.g. `booking/updatestatus/4`.
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn is_multipart(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| multer::parse_boundary(ct).is_ok())
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
    }

    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Fields of a multipart body, or `None` for any other body.
    pub async fn parts(&self) -> Option<Vec<Part>> {
        let boundary =
            multer::parse_boundary(self.content_type.as_deref()?).ok()?;
        let chunk: Result<Vec<u8>, Infallible> = Ok(self.body.clone());
        let body = futures::stream::once(async move { chunk });
        let mut multipart = multer::Multipart::new(body, boundary);

        let mut parts = Vec::new();
        while let Some(field) = multipart.next_field().await.ok()? {
            let name = field.name()?.to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(|m| m.to_string());
            let data = field.bytes().await.ok()?.to_vec();
            parts.push(Part {
                name,
                file_name,
                content_type,
                data,
            });
        }
        Some(parts)
    }
}

#[derive(Debug)]
struct Table {
    key: &'static str,
    next_id: i64,
    /// Newest first, like the backend's `ORDER BY created_at DESC`.
    rows: Vec<Row>,
}

#[derive(Debug, Default)]
struct Tables {
    tables: BTreeMap<&'static str, Table>,
    faults: VecDeque<u16>,
    list_delay: Option<Duration>,
    requests: Vec<RecordedRequest>,
}

/// Shared handle to the stub's state. Cloning shares the tables.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<Mutex<Tables>>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        let tables = TABLES
            .iter()
            .map(|&(name, key)| {
                (
                    name,
                    Table {
                        key,
                        next_id: 1,
                        rows: Vec::new(),
                    },
                )
            })
            .collect();
        Self {
            inner: Arc::new(Mutex::new(Tables {
                tables,
                ..Default::default()
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn key(&self, table: &str) -> Result<&'static str, StoreError> {
        TABLES
            .iter()
            .find(|(name, _)| *name == table)
            .map(|(_, key)| *key)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }

    /// Load rows as given, in order. Rows without a primary key get the next
    /// free id.
    pub fn seed(
        &self,
        table: &str,
        rows: impl IntoIterator<Item = Value>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        let table = table_mut(&mut state, table)?;
        for row in rows {
            let Value::Object(mut row) = row else {
                return Err(StoreError::InvalidBody(
                    "seed rows must be objects".into(),
                ));
            };
            match row.get(table.key).and_then(as_id) {
                Some(id) => table.next_id = table.next_id.max(id + 1),
                None => {
                    row.insert(
                        table.key.to_string(),
                        Value::from(table.next_id),
                    );
                    table.next_id += 1;
                }
            }
            table.rows.push(row);
        }
        Ok(())
    }

    pub fn list(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        let mut state = self.lock();
        Ok(table_mut(&mut state, table)?.rows.clone())
    }

    pub fn row(&self, table: &str, id: i64) -> Result<Option<Row>, StoreError> {
        let mut state = self.lock();
        let table = table_mut(&mut state, table)?;
        Ok(table.position(id).map(|i| table.rows[i].clone()))
    }

    /// Store a new row in front of the others and return its id.
    pub fn insert(&self, table: &str, mut row: Row) -> Result<i64, StoreError> {
        let mut state = self.lock();
        let table = table_mut(&mut state, table)?;
        let id = table.next_id;
        table.next_id += 1;
        row.insert(table.key.to_string(), Value::from(id));
        table.rows.insert(0, row);
        Ok(id)
    }

    /// Merge `changes` into an existing row. The primary key is kept.
    pub fn update(
        &self,
        table_name: &str,
        id: i64,
        changes: Row,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        let table = table_mut(&mut state, table_name)?;
        let i = table.position(id).ok_or_else(|| StoreError::RowNotFound {
            table: table_name.to_string(),
            id,
        })?;
        let key = table.key;
        let row = &mut table.rows[i];
        for (field, value) in changes {
            if field != key {
                row.insert(field, value);
            }
        }
        Ok(())
    }

    pub fn delete(&self, table_name: &str, id: i64) -> Result<(), StoreError> {
        let mut state = self.lock();
        let table = table_mut(&mut state, table_name)?;
        let i = table.position(id).ok_or_else(|| StoreError::RowNotFound {
            table: table_name.to_string(),
            id,
        })?;
        table.rows.remove(i);
        Ok(())
    }

    /// Answer the next request with `status` instead of handling it. Queued
    /// faults are used up in order.
    pub fn fail_next(&self, status: u16) {
        self.lock().faults.push_back(status);
    }

    pub fn take_fault(&self) -> Option<u16> {
        self.lock().faults.pop_front()
    }

    /// Hold back the next list response for `delay`. The rows are read
    /// before the wait, so the response shows the table as it was.
    pub fn delay_next_list(&self, delay: Duration) {
        self.lock().list_delay = Some(delay);
    }

    pub fn take_list_delay(&self) -> Option<Duration> {
        self.lock().list_delay.take()
    }

    pub fn record(&self, request: RecordedRequest) {
        self.lock().requests.push(request);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.last().cloned()
    }

    /// Recorded requests whose path starts with `prefix`, oldest first.
    pub fn requests_to(&self, prefix: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl Table {
    fn position(&self, id: i64) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get(self.key).and_then(as_id) == Some(id))
    }
}

fn table_mut<'a>(
    state: &'a mut Tables,
    name: &str,
) -> Result<&'a mut Table, StoreError> {
    state
        .tables
        .get_mut(name)
        .ok_or_else(|| StoreError::UnknownTable(name.to_string()))
}

/// Ids arrive as numbers or numeric strings depending on the body encoding.
pub fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
