//! Client-side stores for the home-services admin.
//!
//! A [`CollectionStore`] mirrors one backend collection and mediates every
//! read and write to it; an [`AggregateStore`] derives dashboard figures
//! from several collections. Both record failures in their observable
//! state and return [`MutationResult`]s instead of panicking.

pub mod aggregate;
mod bookings;
pub mod collection;
pub mod config;
pub mod context;
pub mod error;
pub mod state;
mod teardown;
pub mod time;
pub mod toast;

pub use aggregate::{AggregateStore, DashboardStats, Reports, StatusTally};
pub use collection::CollectionStore;
pub use config::{Config, Reconcile};
pub use context::StoreContext;
pub use error::{ErrorKind, MutationResult, StoreError};
pub use state::{AggregateState, CollectionState, FetchState, Phase, StoreState};
pub use time::TimeSource;
pub use toast::{Toast, ToastHandle, ToastType};
