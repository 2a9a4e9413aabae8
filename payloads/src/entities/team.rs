use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{
    Create, Delete, Form, ImageSource, RawRecord, RecordId, Resource, ToForm,
    Update,
};

/// A staff profile on the "our team" page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: RecordId,
    pub name: String,
    pub designation: String,
    pub bio: String,
    pub image: Option<String>,
    pub display_order: i64,
    pub status: String,
    pub created_at: Option<String>,
}

impl Resource for TeamMember {
    const LABEL: &'static str = "team member";
    const LIST: &'static str = "member/all";
    const ID_KEYS: &'static [&'static str] = &["member_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            name: raw.text_or(&["name"], ""),
            designation: raw.text_or(&["role", "designation"], ""),
            bio: raw.text_or(&["description", "bio"], ""),
            image: raw.non_empty(&["image"]),
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
pub struct TeamMemberDraft {
    pub name: String,
    pub designation: String,
    pub bio: String,
    pub display_order: i64,
    pub status: String,
    pub image: Option<ImageSource>,
}

impl ToForm for TeamMemberDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("name", &self.name)
            .field("role", &self.designation)
            .field("description", &self.bio)
            .field("sort_order", self.display_order)
            .field("status", &self.status)
            .opt("image", self.image.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamMemberPatch {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub bio: Option<String>,
    pub display_order: Option<i64>,
    pub status: Option<String>,
    pub image: Option<ImageSource>,
}

impl ToForm for TeamMemberPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("name", self.name.as_deref())
            .opt("role", self.designation.as_deref())
            .opt("description", self.bio.as_deref())
            .opt("sort_order", self.display_order)
            .opt("status", self.status.as_deref())
            .opt("image", self.image.clone())
    }
}

impl Create for TeamMember {
    type Draft = TeamMemberDraft;
    const CREATE: &'static str = "member/add";
}

impl Update for TeamMember {
    type Patch = TeamMemberPatch;

    fn update_path(id: RecordId, _patch: &TeamMemberPatch) -> String {
        format!("member/update/{id}")
    }
}

impl Delete for TeamMember {
    const DELETE: &'static str = "member/delete";
    const DELETE_KEY: &'static str = "id";
}
