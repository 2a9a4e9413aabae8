//! Booking-specific mutators. Bookings are never edited as a whole; each of
//! these maps to its own backend endpoint.

use payloads::{Booking, BookingPatch, RecordId, Worker};
use rust_decimal::Decimal;

use crate::{CollectionStore, MutationResult};

impl CollectionStore<Booking> {
    pub async fn update_status(
        &self,
        id: RecordId,
        status: impl Into<String>,
    ) -> MutationResult<Option<Booking>> {
        self.update(id, &BookingPatch::Status(status.into())).await
    }

    pub async fn update_amount(
        &self,
        id: RecordId,
        amount: Decimal,
    ) -> MutationResult<Option<Booking>> {
        self.update(id, &BookingPatch::Amount(amount)).await
    }

    pub async fn assign_worker(
        &self,
        id: RecordId,
        worker: &Worker,
    ) -> MutationResult<Option<Booking>> {
        let patch = BookingPatch::AssignWorker {
            worker_id: worker.staff_id,
            worker_name: Some(worker.name.clone()).filter(|n| !n.is_empty()),
        };
        self.update(id, &patch).await
    }
}
