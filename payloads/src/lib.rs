//! Wire-level data model for the home-services admin backend.
//!
//! Every collection the admin manages is described by a [`Resource`]
//! implementation: where to list it, how to normalize a backend row into a
//! stable client record, and (through [`Create`], [`Update`] and [`Delete`])
//! how to mutate it. The [`APIClient`] performs the actual HTTP calls.

pub mod api_client;
pub mod entities;
pub mod form;
pub mod raw;
pub mod resource;
pub mod time;

pub use api_client::{APIClient, ClientError};
pub use entities::*;
pub use form::{Encoding, Form, FormValue, ImageSource, ToForm, Upload};
pub use raw::{Echo, RawRecord};
pub use resource::{Create, Delete, Resource, Update};

use serde::{Deserialize, Serialize};

/// Identity of a record within one collection.
///
/// The backend uses different key names per entity (`book_id`, `staff_id`,
/// `complaint_id`, ...) but the values are always integers.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
