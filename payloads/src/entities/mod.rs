//! The admin's collections, one module per backend resource.

mod account_deletion;
mod blog;
mod booking;
mod category;
mod complaint;
mod contact;
mod notification;
mod payment;
mod privacy;
mod promo;
mod sub_service;
mod team;
mod testimonial;
mod user;
mod worker;

pub use account_deletion::{AccountDeletionPatch, AccountDeletionRequest};
pub use blog::{BlogDraft, BlogPatch, BlogPost};
pub use booking::{Booking, BookingPatch};
pub use category::{Category, CategoryDraft, CategoryPatch};
pub use complaint::{Complaint, ComplaintPatch};
pub use contact::{ContactMessage, ContactPatch};
pub use notification::{Notification, NotificationDraft};
pub use payment::{Payment, PaymentPatch};
pub use privacy::{PrivacyDraft, PrivacyPatch, PrivacySection};
pub use promo::{PromoCode, PromoDraft, PromoPatch};
pub use sub_service::{SubService, SubServiceDraft, SubServicePatch};
pub use team::{TeamMember, TeamMemberDraft, TeamMemberPatch};
pub use testimonial::{Testimonial, TestimonialDraft, TestimonialPatch};
pub use user::{User, UserDraft, UserPatch};
pub use worker::{Worker, WorkerDraft, WorkerPatch};

/// Identity read from a raw row, or the zero id for rows missing one.
fn identity(raw: &crate::RawRecord, keys: &[&str]) -> crate::RecordId {
    raw.id(keys).unwrap_or_default()
}

/// Timestamps are kept as the backend's text; only ever compared and shown.
fn created_at(raw: &crate::RawRecord) -> Option<String> {
    raw.non_empty(&["created_at", "createdAt"])
}
