use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{
    Create, Delete, Form, ImageSource, RawRecord, RecordId, Resource, ToForm,
    Update,
};

/// An account on the platform: customer, staff or admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub status: String,
    pub image: Option<String>,
    pub created_at: Option<String>,
}

impl Resource for User {
    const LABEL: &'static str = "user";
    const LIST: &'static str = "user/allNew";
    const ID_KEYS: &'static [&'static str] = &["id", "user_id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            name: raw.text_or(&["full_name", "name"], ""),
            email: raw.text_or(&["email"], ""),
            phone: raw.text_or(&["phone_number", "phone"], ""),
            role: raw.non_empty(&["role"]).unwrap_or_else(|| "customer".into()),
            status: raw.status_or(&["status"], "Inactive"),
            image: raw.non_empty(&["profile_image", "image"]),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: String,
    pub status: String,
    pub image: Option<ImageSource>,
}

impl ToForm for UserDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &self.password)
            .field("role", &self.role)
            .field("status", &self.status)
            .opt("image", self.image.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub image: Option<ImageSource>,
}

impl ToForm for UserPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("name", self.name.as_deref())
            .opt("email", self.email.as_deref())
            .opt("phone", self.phone.as_deref())
            .opt("password", self.password.as_deref())
            .opt("role", self.role.as_deref())
            .opt("status", self.status.as_deref())
            .opt("image", self.image.clone())
    }
}

impl Create for User {
    type Draft = UserDraft;
    const CREATE: &'static str = "user/add";
}

impl Update for User {
    type Patch = UserPatch;

    fn update_path(id: RecordId, _patch: &UserPatch) -> String {
        format!("user/update/{id}")
    }
}

impl Delete for User {
    const DELETE: &'static str = "user/delete";
    const DELETE_KEY: &'static str = "id";
}
