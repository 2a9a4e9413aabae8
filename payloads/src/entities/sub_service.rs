use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{
    Create, Delete, Form, ImageSource, RawRecord, RecordId, Resource, ToForm,
    Update,
};

/// A bookable service inside a category, with its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubService {
    pub id: RecordId,
    pub category_id: Option<RecordId>,
    pub category_name: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub status: String,
    pub created_at: Option<String>,
}

impl Resource for SubService {
    const LABEL: &'static str = "sub-service";
    const LIST: &'static str = "subservices/allNew";
    const ID_KEYS: &'static [&'static str] = &["sub_service_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            category_id: raw.id(&["service_id", "category_id"]),
            category_name: raw.text_or(&["service_name", "category_name"], ""),
            name: raw.text_or(&["sub_service_name", "name"], ""),
            description: raw.text_or(&["description"], ""),
            price: raw.decimal(&["price"]).unwrap_or_default(),
            image: raw.non_empty(&["sub_service_image", "image"]),
            status: raw.status_or(&["status"], "Inactive"),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubServiceDraft {
    pub category_id: RecordId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub status: String,
    pub image: Option<ImageSource>,
}

impl ToForm for SubServiceDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("service_id", self.category_id)
            .field("sub_service_name", &self.name)
            .field("description", &self.description)
            .field("price", self.price)
            .field("status", &self.status)
            .opt("image", self.image.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubServicePatch {
    pub category_id: Option<RecordId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<String>,
    pub image: Option<ImageSource>,
}

impl ToForm for SubServicePatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("service_id", self.category_id)
            .opt("sub_service_name", self.name.as_deref())
            .opt("description", self.description.as_deref())
            .opt("price", self.price)
            .opt("status", self.status.as_deref())
            .opt("image", self.image.clone())
    }
}

impl Create for SubService {
    type Draft = SubServiceDraft;
    const CREATE: &'static str = "subservices/add_new";
}

impl Update for SubService {
    type Patch = SubServicePatch;

    fn update_path(id: RecordId, _patch: &SubServicePatch) -> String {
        format!("subservices/updateNew/{id}")
    }
}

impl Delete for SubService {
    const DELETE: &'static str = "subservices/delete";
    const DELETE_KEY: &'static str = "sub_service_id";
}
