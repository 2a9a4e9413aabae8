use std::future::Future;

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::resource::delete_body;
use crate::{
    APIClient, ClientError, Create, Delete, Echo, Form, ImageSource, RawRecord,
    RecordId, Resource, ToForm, Update,
};

/// Form fields that belong to the worker's user account rather than to the
/// staff row.
const USER_FIELDS: &[&str] = &["name", "email", "phone", "password", "image"];

/// A service provider. Backed by two rows: a user account and a staff
/// profile pointing at it through `staff_user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub staff_id: RecordId,
    pub user_id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category_id: Option<RecordId>,
    pub category_name: String,
    pub experience: i64,
    pub rating: Decimal,
    pub completed_jobs: i64,
    pub available: bool,
    pub status: String,
    pub image: Option<String>,
    pub created_at: Option<String>,
}

impl Resource for Worker {
    const LABEL: &'static str = "worker";
    const LIST: &'static str = "staff/all_admin";
    const ID_KEYS: &'static [&'static str] = &["staff_id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            staff_id: identity(raw, Self::ID_KEYS),
            user_id: raw.id(&["staff_user_id", "user_id"]),
            name: raw.text_or(&["staff_name", "name"], ""),
            email: raw.text_or(&["email"], ""),
            phone: raw.text_or(&["phone_number", "phone"], ""),
            category_id: raw.id(&["service_id", "category_id"]),
            category_name: raw.text_or(&["service_name", "category_name"], ""),
            experience: raw.integer(&["experience"]).unwrap_or(0),
            rating: raw.decimal(&["avg_rating", "rating"]).unwrap_or_default(),
            completed_jobs: raw
                .integer(&["total_jobs", "completed_jobs"])
                .unwrap_or(0),
            available: raw
                .flag(&["is_available", "available"])
                .unwrap_or(false),
            status: raw.status_or(&["status"], "Inactive"),
            image: raw.non_empty(&["profile_image", "image"]),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.staff_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub category_id: RecordId,
    pub experience: i64,
    pub available: bool,
    pub status: String,
    pub image: Option<ImageSource>,
}

impl ToForm for WorkerDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &self.password)
            .opt("image", self.image.clone())
            .field("service_id", self.category_id)
            .field("experience", self.experience)
            .field("is_available", self.available)
            .field("status", &self.status)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub image: Option<ImageSource>,
    pub category_id: Option<RecordId>,
    pub experience: Option<i64>,
    pub available: Option<bool>,
    pub status: Option<String>,
}

impl ToForm for WorkerPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("name", self.name.as_deref())
            .opt("email", self.email.as_deref())
            .opt("phone", self.phone.as_deref())
            .opt("password", self.password.as_deref())
            .opt("image", self.image.clone())
            .opt("service_id", self.category_id)
            .opt("experience", self.experience)
            .opt("is_available", self.available)
            .opt("status", self.status.as_deref())
    }
}

impl Create for Worker {
    type Draft = WorkerDraft;
    const CREATE: &'static str = "staff/addNew";

    /// Create the user account first, then the staff row referencing it.
    fn create(
        client: &APIClient,
        mut form: Form,
    ) -> impl Future<Output = Result<Echo, ClientError>> + Send {
        async move {
            let mut user = form.split_off(USER_FIELDS);
            user.set("role", "staff");
            if let Some(stamp) = form.get("created_at").cloned() {
                user.set("created_at", stamp);
            }
            let user_echo =
                client.send_form(Method::POST, "user/add", user).await?;
            let user_id = user_echo.id(&["user_id"]).ok_or_else(|| {
                ClientError::Malformed(
                    "user account created without an id".to_string(),
                )
            })?;

            form.set("staff_user_id", user_id);
            let echo =
                client.send_form(Method::POST, Self::CREATE, form).await?;
            Ok(echo.carry("staff_user_id", user_id.0))
        }
    }
}

impl Update for Worker {
    type Patch = WorkerPatch;

    fn update_path(id: RecordId, _patch: &WorkerPatch) -> String {
        format!("staff/updateNew/{id}")
    }

    /// Account fields go to the user endpoint, the rest to the staff row.
    /// Without a known user id everything is sent to the staff row.
    fn update(
        client: &APIClient,
        id: RecordId,
        current: Option<&Self>,
        patch: &WorkerPatch,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        let mut staff = patch.to_form();
        let user_id = current.and_then(|worker| worker.user_id);
        let user = match user_id {
            Some(_) => staff.split_off(USER_FIELDS),
            None => Form::new(),
        };
        if user_id.is_none() && USER_FIELDS.iter().any(|k| staff.contains(k)) {
            tracing::warn!(%id, "worker has no known user id");
        }
        let staff_path = Self::update_path(id, patch);
        async move {
            if let Some(user_id) = user_id
                && !user.is_empty()
            {
                let path = format!("user/update/{user_id}");
                client.send_form(Method::PUT, &path, user).await?;
            }
            if !staff.is_empty() {
                client.send_form(Method::PUT, &staff_path, staff).await?;
            }
            Ok(())
        }
    }
}

impl Delete for Worker {
    const DELETE: &'static str = "staff/deleteNew";
    const DELETE_KEY: &'static str = "staff_id";

    /// Remove the staff row, then its user account when known.
    fn delete(
        client: &APIClient,
        id: RecordId,
        current: Option<&Self>,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        let user_id = current.and_then(|worker| worker.user_id);
        async move {
            client
                .post(Self::DELETE, &delete_body(Self::DELETE_KEY, id))
                .await?;
            if let Some(user_id) = user_id {
                client.post("user/delete", &delete_body("id", user_id)).await?;
            }
            Ok(())
        }
    }
}
