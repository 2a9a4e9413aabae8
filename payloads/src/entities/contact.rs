use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{Delete, Form, RawRecord, RecordId, Resource, ToForm, Update};

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: Option<String>,
}

impl Resource for ContactMessage {
    const LABEL: &'static str = "contact message";
    const LIST: &'static str = "contact/all";
    const ID_KEYS: &'static [&'static str] = &["contact_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            name: raw.text_or(&["name"], ""),
            email: raw.text_or(&["email"], ""),
            phone: raw.text_or(&["phone_number", "phone"], ""),
            subject: raw.text_or(&["subject"], ""),
            message: raw.text_or(&["message"], ""),
            read: raw.flag(&["is_read", "read"]).unwrap_or(false),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub read: Option<bool>,
}

impl ToForm for ContactPatch {
    fn to_form(&self) -> Form {
        Form::new().opt("is_read", self.read)
    }
}

impl Update for ContactMessage {
    type Patch = ContactPatch;

    fn update_path(id: RecordId, _patch: &ContactPatch) -> String {
        format!("contact/update/{id}")
    }
}

impl Delete for ContactMessage {
    const DELETE: &'static str = "contact/delete";
    const DELETE_KEY: &'static str = "id";
}
