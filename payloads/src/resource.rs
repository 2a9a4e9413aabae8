//! Per-entity description of a REST collection.
//!
//! Each admin collection is a near-identical instantiation of the same
//! pattern, so the differences are captured here as trait items and the
//! generic store drives all of them the same way. Default method bodies
//! implement the common single-request contract; entities whose backend
//! contract spans several calls override them.

use std::future::Future;

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{APIClient, ClientError, Echo, Form, RawRecord, RecordId, ToForm};

pub trait Resource:
    Clone + std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static
{
    /// Singular, lower-case name used in messages ("promo code").
    const LABEL: &'static str;
    /// List endpoint, relative to `/api/`.
    const LIST: &'static str;
    /// Keys that can carry the identity in a raw row, primary key first.
    const ID_KEYS: &'static [&'static str];

    /// Project a raw row into the client shape, applying defaults.
    ///
    /// Must accept its own serialized output unchanged, so that
    /// `normalize(RawRecord::from_serialize(r)) == r`.
    fn normalize(raw: &RawRecord) -> Self;

    fn id(&self) -> RecordId;

    fn renormalize(&self) -> Self {
        Self::normalize(&RawRecord::from_serialize(self))
    }
}

pub trait Create: Resource {
    type Draft: ToForm + Send + Sync;

    const CREATE: &'static str;

    /// Submit a create form (already stamped with `created_at`).
    fn create(
        client: &APIClient,
        form: Form,
    ) -> impl Future<Output = Result<Echo, ClientError>> + Send {
        async move { client.send_form(Method::POST, Self::CREATE, form).await }
    }
}

pub trait Update: Resource {
    type Patch: ToForm + Send + Sync;

    fn update_path(id: RecordId, patch: &Self::Patch) -> String;

    /// `current` is the locally known copy, if any. Most entities only need
    /// the id; a few address related rows through it.
    fn update(
        client: &APIClient,
        id: RecordId,
        current: Option<&Self>,
        patch: &Self::Patch,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        let _ = current;
        let path = Self::update_path(id, patch);
        let form = patch.to_form();
        async move {
            client.send_form(Method::PUT, &path, form).await?;
            Ok(())
        }
    }
}

pub trait Delete: Resource {
    /// Delete action endpoint. The backend takes `POST` with the id in the
    /// body rather than a `DELETE` verb.
    const DELETE: &'static str;
    /// Body key carrying the id (`id`, `service_id`, ...).
    const DELETE_KEY: &'static str;

    fn delete(
        client: &APIClient,
        id: RecordId,
        current: Option<&Self>,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        let _ = current;
        let body = delete_body(Self::DELETE_KEY, id);
        async move { client.post(Self::DELETE, &body).await }
    }
}

pub fn delete_body(key: &str, id: RecordId) -> Value {
    let mut body = Map::new();
    body.insert(key.to_string(), Value::from(id.0));
    Value::Object(body)
}
