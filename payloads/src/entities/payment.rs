use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{Form, RawRecord, RecordId, Resource, ToForm, Update};

/// Earnings record for a completed booking: what the customer paid, what
/// the platform kept and what the worker is owed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: RecordId,
    pub booking_id: Option<RecordId>,
    pub worker_id: Option<RecordId>,
    pub worker_name: String,
    pub service_name: String,
    pub amount: Decimal,
    pub commission: Decimal,
    pub worker_amount: Decimal,
    pub status: String,
    pub method: Option<String>,
    pub created_at: Option<String>,
}

impl Resource for Payment {
    const LABEL: &'static str = "payment";
    const LIST: &'static str = "earning/all";
    const ID_KEYS: &'static [&'static str] = &["earning_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            booking_id: raw.id(&["book_id", "booking_id"]),
            worker_id: raw.id(&["staff_id", "worker_id"]),
            worker_name: raw.text_or(&["staff_name", "worker_name"], ""),
            service_name: raw.text_or(&["service_name"], ""),
            amount: raw
                .decimal(&["total_amount", "amount"])
                .unwrap_or_default(),
            commission: raw
                .decimal(&["admin_commission", "commission"])
                .unwrap_or_default(),
            worker_amount: raw
                .decimal(&["staff_earning", "worker_amount"])
                .unwrap_or_default(),
            status: raw.status_or(&["payment_status", "status"], "Pending"),
            method: raw.non_empty(&["payment_method", "method"]),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    pub status: Option<String>,
    pub method: Option<String>,
}

impl ToForm for PaymentPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("payment_status", self.status.as_deref())
            .opt("payment_method", self.method.as_deref())
    }
}

impl Update for Payment {
    type Patch = PaymentPatch;

    fn update_path(id: RecordId, _patch: &PaymentPatch) -> String {
        format!("earning/update/{id}")
    }
}
