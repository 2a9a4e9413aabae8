use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{
    Create, Delete, Form, ImageSource, RawRecord, RecordId, Resource, ToForm,
    Update,
};

/// A customer quote shown on the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: RecordId,
    pub name: String,
    pub message: String,
    pub rating: i64,
    pub image: Option<String>,
    pub status: String,
    pub created_at: Option<String>,
}

impl Resource for Testimonial {
    const LABEL: &'static str = "testimonial";
    const LIST: &'static str = "testimonial/all";
    const ID_KEYS: &'static [&'static str] = &["testimonial_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            name: raw.text_or(&["customer_name", "name"], ""),
            message: raw.text_or(&["review", "message"], ""),
            rating: raw.integer(&["rating"]).unwrap_or(0),
            image: raw.non_empty(&["image"]),
            status: raw.status_or(&["status"], "Inactive"),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestimonialDraft {
    pub name: String,
    pub message: String,
    pub rating: i64,
    pub status: String,
    pub image: Option<ImageSource>,
}

impl ToForm for TestimonialDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("customer_name", &self.name)
            .field("review", &self.message)
            .field("rating", self.rating)
            .field("status", &self.status)
            .opt("image", self.image.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestimonialPatch {
    pub name: Option<String>,
    pub message: Option<String>,
    pub rating: Option<i64>,
    pub status: Option<String>,
    pub image: Option<ImageSource>,
}

impl ToForm for TestimonialPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("customer_name", self.name.as_deref())
            .opt("review", self.message.as_deref())
            .opt("rating", self.rating)
            .opt("status", self.status.as_deref())
            .opt("image", self.image.clone())
    }
}

impl Create for Testimonial {
    type Draft = TestimonialDraft;
    const CREATE: &'static str = "testimonial/add";
}

impl Update for Testimonial {
    type Patch = TestimonialPatch;

    fn update_path(id: RecordId, _patch: &TestimonialPatch) -> String {
        format!("testimonial/update/{id}")
    }
}

impl Delete for Testimonial {
    const DELETE: &'static str = "testimonial/delete";
    const DELETE_KEY: &'static str = "id";
}
