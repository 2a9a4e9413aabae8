use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{
    Create, Delete, Form, RawRecord, RecordId, Resource, ToForm, Update,
};

/// One section of the privacy policy page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySection {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub display_order: i64,
    pub status: String,
    pub created_at: Option<String>,
}

impl Resource for PrivacySection {
    const LABEL: &'static str = "privacy section";
    const LIST: &'static str = "privacy/all";
    const ID_KEYS: &'static [&'static str] = &["privacy_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            title: raw.text_or(&["heading", "title"], ""),
            content: raw.text_or(&["description", "content"], ""),
            display_order: raw
                .integer(&["sort_order", "display_order"])
                .unwrap_or(0),
            status: raw.status_or(&["status"], "Inactive"),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrivacyDraft {
    pub title: String,
    pub content: String,
    pub display_order: i64,
    pub status: String,
}

impl ToForm for PrivacyDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("heading", &self.title)
            .field("description", &self.content)
            .field("sort_order", self.display_order)
            .field("status", &self.status)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrivacyPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub display_order: Option<i64>,
    pub status: Option<String>,
}

impl ToForm for PrivacyPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("heading", self.title.as_deref())
            .opt("description", self.content.as_deref())
            .opt("sort_order", self.display_order)
            .opt("status", self.status.as_deref())
    }
}

impl Create for PrivacySection {
    type Draft = PrivacyDraft;
    const CREATE: &'static str = "privacy/add";
}

impl Update for PrivacySection {
    type Patch = PrivacyPatch;

    fn update_path(id: RecordId, _patch: &PrivacyPatch) -> String {
        format!("privacy/update/{id}")
    }
}

impl Delete for PrivacySection {
    const DELETE: &'static str = "privacy/delete";
    const DELETE_KEY: &'static str = "id";
}
