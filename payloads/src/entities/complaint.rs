use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{Form, RawRecord, RecordId, Resource, ToForm, Update};

/// An issue a customer raised about a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub complaint_id: RecordId,
    pub booking_id: Option<RecordId>,
    pub customer_id: Option<RecordId>,
    pub customer_name: String,
    pub description: String,
    pub status: String,
    pub response: Option<String>,
    pub created_at: Option<String>,
}

impl Resource for Complaint {
    const LABEL: &'static str = "complaint";
    const LIST: &'static str = "complaint/all";
    const ID_KEYS: &'static [&'static str] = &["complaint_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            complaint_id: identity(raw, Self::ID_KEYS),
            booking_id: raw.id(&["book_id", "booking_id"]),
            customer_id: raw.id(&["user_id", "customer_id"]),
            customer_name: raw.text_or(&["user_name", "customer_name"], ""),
            description: raw.text_or(&["issue", "description"], ""),
            status: raw.status_or(&["status"], "Open"),
            response: raw.non_empty(&["admin_response", "response"]),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.complaint_id
    }
}

impl Complaint {
    pub fn is_open(&self) -> bool {
        !matches!(
            self.status.to_ascii_lowercase().as_str(),
            "resolved" | "closed"
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComplaintPatch {
    pub status: Option<String>,
    pub response: Option<String>,
}

impl ToForm for ComplaintPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("status", self.status.as_deref())
            .opt("admin_response", self.response.as_deref())
    }
}

impl Update for Complaint {
    type Patch = ComplaintPatch;

    fn update_path(id: RecordId, _patch: &ComplaintPatch) -> String {
        format!("complaint/update/{id}")
    }
}
