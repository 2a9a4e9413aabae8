use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{created_at, identity};
use crate::{
    Create, Delete, Form, ImageSource, RawRecord, RecordId, Resource, ToForm,
    Update,
};

/// A discount code customers can apply at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: RecordId,
    pub code: String,
    pub title: String,
    pub description: String,
    pub discount_type: String,
    pub discount_value: Decimal,
    pub min_order: Decimal,
    pub max_uses: i64,
    pub used_count: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    pub image: Option<String>,
    pub created_at: Option<String>,
}

impl Resource for PromoCode {
    const LABEL: &'static str = "promo code";
    const LIST: &'static str = "discount/allnew";
    const ID_KEYS: &'static [&'static str] = &["discount_id", "id"];

    fn normalize(raw: &RawRecord) -> Self {
        Self {
            id: identity(raw, Self::ID_KEYS),
            code: raw.text_or(&["promo_code", "code"], ""),
            title: raw.text_or(&["title"], ""),
            description: raw.text_or(&["description"], ""),
            discount_type: raw
                .non_empty(&["discount_type"])
                .unwrap_or_else(|| "percentage".into()),
            discount_value: raw
                .decimal(&["value", "discount_value"])
                .unwrap_or_default(),
            min_order: raw
                .decimal(&["min_amount", "min_order"])
                .unwrap_or_default(),
            max_uses: raw.integer(&["usage_limit", "max_uses"]).unwrap_or(0),
            used_count: raw.integer(&["used_count"]).unwrap_or(0),
            start_date: raw.non_empty(&["start_date"]),
            end_date: raw.non_empty(&["expiry_date", "end_date"]),
            status: raw.status_or(&["status"], "Inactive"),
            image: raw.non_empty(&["image"]),
            created_at: created_at(raw),
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

impl PromoCode {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromoDraft {
    pub code: String,
    pub title: String,
    pub description: String,
    pub discount_type: String,
    pub discount_value: Decimal,
    pub min_order: Decimal,
    pub max_uses: i64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    pub image: Option<ImageSource>,
}

impl ToForm for PromoDraft {
    fn to_form(&self) -> Form {
        Form::new()
            .field("promo_code", &self.code)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("discount_type", &self.discount_type)
            .field("discount_value", self.discount_value)
            .field("min_order", self.min_order)
            .field("max_uses", self.max_uses)
            .opt("start_date", self.start_date.as_deref())
            .opt("end_date", self.end_date.as_deref())
            .field("status", &self.status)
            .opt("image", self.image.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromoPatch {
    pub code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: Option<Decimal>,
    pub min_order: Option<Decimal>,
    pub max_uses: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub image: Option<ImageSource>,
}

impl ToForm for PromoPatch {
    fn to_form(&self) -> Form {
        Form::new()
            .opt("promo_code", self.code.as_deref())
            .opt("title", self.title.as_deref())
            .opt("description", self.description.as_deref())
            .opt("discount_type", self.discount_type.as_deref())
            .opt("discount_value", self.discount_value)
            .opt("min_order", self.min_order)
            .opt("max_uses", self.max_uses)
            .opt("start_date", self.start_date.as_deref())
            .opt("end_date", self.end_date.as_deref())
            .opt("status", self.status.as_deref())
            .opt("image", self.image.clone())
    }
}

impl Create for PromoCode {
    type Draft = PromoDraft;
    const CREATE: &'static str = "discount/addNew";
}

impl Update for PromoCode {
    type Patch = PromoPatch;

    fn update_path(id: RecordId, _patch: &PromoPatch) -> String {
        format!("discount/updateNew/{id}")
    }
}

impl Delete for PromoCode {
    const DELETE: &'static str = "discount/delete";
    const DELETE_KEY: &'static str = "id";
}
