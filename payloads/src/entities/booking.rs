use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{Form, RawRecord, RecordId, Resource, ToForm, Update};

/// A customer's booking of a sub-service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: RecordId,
    pub customer_id: Option<RecordId>,
    pub customer_name: String,
    pub worker_id: Option<RecordId>,
    pub worker_name: Option<String>,
    pub service_name: String,
    pub sub_service_name: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub address: String,
    pub amount: Decimal,
    pub status: String,
    pub payment_status: String,
    pub created_at: Option<String>,
}

impl Resource for Booking {
    const LABEL: &'static str = "booking";
    const LIST: &'static str = "booking/all";
    const ID_KEYS: &'static [&'static str] = &["book_id", "booking_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            customer_id: raw.id(&["user_id", "customer_id"]),
            customer_name: raw.text_or(&["user_name", "customer_name"], ""),
            worker_id: raw.id(&["staff_id", "worker_id"]),
            worker_name: raw.non_empty(&["staff_name", "worker_name"]),
            service_name: raw.text_or(&["service_name"], ""),
            sub_service_name: raw.text_or(&["sub_service_name"], ""),
            date: raw.non_empty(&["booking_date", "date"]),
            time: raw.non_empty(&["booking_time", "time"]),
            address: raw.text_or(&["address"], ""),
            amount: raw
                .decimal(&["total_amount", "amount"])
                .unwrap_or_default(),
            status: raw.status_or(&["booking_status", "status"], "Pending"),
            payment_status: raw.status_or(&["payment_status"], "Unpaid"),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Bookings are never edited as a whole; each kind of change has its own
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingPatch {
    Status(String),
    Amount(Decimal),
    AssignWorker {
        worker_id: RecordId,
        worker_name: Option<String>,
    },
}

impl ToForm for BookingPatch {
    fn to_form(&self) -> Form {
        match self {
            Self::Status(status) => Form::new().field("booking_status", status),
            Self::Amount(amount) => Form::new().field("amount", *amount),
            Self::AssignWorker {
                worker_id,
                worker_name,
            } => Form::new()
                .field("staff_id", *worker_id)
                .opt("staff_name", worker_name.as_deref()),
        }
    }
}

impl Update for Booking {
    type Patch = BookingPatch;

    fn update_path(id: RecordId, patch: &BookingPatch) -> String {
        match patch {
            BookingPatch::Status(_) => format!("booking/updatestatus/{id}"),
            BookingPatch::Amount(_) => format!("booking/updateamountNew/{id}"),
            BookingPatch::AssignWorker { .. } => {
                format!("booking/assignWorker/{id}")
            }
        }
    }
}
