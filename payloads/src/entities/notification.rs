use std::future::Future;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{created_at, identity};
use crate::{
    APIClient, ClientError, Create, Echo, Form, RawRecord, RecordId, Resource,
    ToForm,
};

const PUSH_ALL: &str = "send/send-data-to-all";

/// A broadcast message sent to app users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: RecordId,
    pub title: String,
    pub message: String,
    pub target: String,
    pub created_at: Option<String>,
}

impl Resource for Notification {
    const LABEL: &'static str = "notification";
    const LIST: &'static str = "notification/all";
    const ID_KEYS: &'static [&'static str] = &["notification_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            title: raw.text_or(&["title"], ""),
            message: raw.text_or(&["body", "message"], ""),
            target: raw
                .non_empty(&["audience", "target"])
                .unwrap_or_else(|| "all".into()),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub target: Option<String>,
}

impl ToForm for NotificationDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("title", &self.title)
            .field("message", &self.message)
            .opt("target", self.target.as_deref())
    }
}

impl Create for Notification {
    type Draft = NotificationDraft;
    const CREATE: &'static str = "notification/add";

    /// Push the message to every device, then store it in the history. A
    /// failed push leaves no history row.
    fn create(
        client: &APIClient,
        form: Form,
    ) -> impl Future<Output = Result<Echo, ClientError>> + Send {
        let raw = form.to_raw();
        let push = json!({
            "title": raw.text_or(&["title"], ""),
            "body": raw.text_or(&["message"], ""),
        });
        async move {
            client.post(PUSH_ALL, &push).await?;
            client.send_form(Method::POST, Self::CREATE, form).await
        }
    }
}
