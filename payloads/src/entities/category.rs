use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{
    Create, Delete, Form, ImageSource, RawRecord, RecordId, Resource, ToForm,
    Update,
};

/// A top-level service category ("Cleaning", "Plumbing").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub status: String,
    pub sub_service_count: i64,
    pub created_at: Option<String>,
}

impl Resource for Category {
    const LABEL: &'static str = "category";
    const LIST: &'static str = "services/allNew";
    const ID_KEYS: &'static [&'static str] = &["service_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            name: raw.text_or(&["service_name", "name"], ""),
            description: raw.text_or(&["description"], ""),
            image: raw.non_empty(&["service_image", "image"]),
            status: raw.status_or(&["status"], "Inactive"),
            sub_service_count: raw
                .integer(&["subservices_count", "sub_service_count"])
                .unwrap_or(0),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub status: String,
    pub image: Option<ImageSource>,
}

impl ToForm for CategoryDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("service_name", &self.name)
            .field("description", &self.description)
            .field("status", &self.status)
            .opt("image", self.image.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub image: Option<ImageSource>,
}

impl ToForm for CategoryPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("service_name", self.name.as_deref())
            .opt("description", self.description.as_deref())
            .opt("status", self.status.as_deref())
            .opt("image", self.image.clone())
    }
}

impl Create for Category {
    type Draft = CategoryDraft;
    const CREATE: &'static str = "services/add";
}

impl Update for Category {
    type Patch = CategoryPatch;

    fn update_path(id: RecordId, _patch: &CategoryPatch) -> String {
        format!("services/update/{id}")
    }
}

impl Delete for Category {
    const DELETE: &'static str = "services/delete";
    const DELETE_KEY: &'static str = "service_id";
}
