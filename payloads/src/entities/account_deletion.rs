use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{Delete, Form, RawRecord, RecordId, Resource, ToForm, Update};

/// A user's request to have their account removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDeletionRequest {
    pub id: RecordId,
    pub user_id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub reason: String,
    pub status: String,
    pub created_at: Option<String>,
}

impl Resource for AccountDeletionRequest {
    const LABEL: &'static str = "account deletion request";
    const LIST: &'static str = "account_delete/all";
    const ID_KEYS: &'static [&'static str] = &["request_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            user_id: raw.id(&["user_id"]),
            name: raw.text_or(&["full_name", "name"], ""),
            email: raw.text_or(&["email"], ""),
            reason: raw.text_or(&["reason"], ""),
            status: raw.status_or(&["status"], "Pending"),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountDeletionPatch {
    pub status: Option<String>,
}

impl ToForm for AccountDeletionPatch {
    fn to_form(&self) -> Form {
        Form::new().opt("status", self.status.as_deref())
    }
}

impl Update for AccountDeletionRequest {
    type Patch = AccountDeletionPatch;

    fn update_path(id: RecordId, _patch: &AccountDeletionPatch) -> String {
        format!("account_delete/update/{id}")
    }
}

impl Delete for AccountDeletionRequest {
    const DELETE: &'static str = "account_delete/delete";
    const DELETE_KEY: &'static str = "id";
}
