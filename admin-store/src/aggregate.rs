//! Read-only stores that derive figures from one or more collections.
//!
//! Every fetch loads its source collections in parallel and recomputes the
//! figures from scratch. If any source fails, the whole aggregate fails.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt};
use payloads::{
    APIClient, Booking, Category, ClientError, Complaint, Payment, PromoCode,
    User, Worker,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::collection::fetch_collection;
use crate::state::{AggregateState, FetchState};
use crate::teardown::Teardown;
use crate::{MutationResult, StoreContext};

type Loader<T> = Box<
    dyn Fn(Arc<APIClient>) -> BoxFuture<'static, Result<T, ClientError>>
        + Send
        + Sync,
>;

pub struct AggregateStore<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AggregateStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<T> {
    label: &'static str,
    client: Arc<APIClient>,
    loader: Loader<T>,
    state: Mutex<AggregateState<T>>,
    teardown: Teardown,
    fetches: AtomicU64,
}

impl<T: Clone + Send + 'static> AggregateStore<T> {
    pub fn new<F, Fut>(
        ctx: &StoreContext,
        label: &'static str,
        loader: F,
    ) -> Self
    where
        F: Fn(Arc<APIClient>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                label,
                client: ctx.client.clone(),
                loader: Box::new(move |client| loader(client).boxed()),
                state: Mutex::new(AggregateState::default()),
                teardown: Teardown::new(),
                fetches: AtomicU64::new(0),
            }),
        }
    }

    /// Load once and hand the store back; failures end up in its state.
    pub async fn mounted(self) -> Self {
        let _ = self.fetch().await;
        self
    }

    pub fn snapshot(&self) -> AggregateState<T> {
        self.lock().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock().data.as_ref().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn teardown(&self) {
        self.inner.teardown.fire();
    }

    fn lock(&self) -> MutexGuard<'_, AggregateState<T>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn apply<R>(
        &self,
        f: impl FnOnce(&mut AggregateState<T>) -> R,
    ) -> MutationResult<R> {
        let mut state = self.lock();
        self.inner.teardown.ensure_live()?;
        Ok(f(&mut state))
    }

    #[tracing::instrument(skip(self), fields(aggregate = self.inner.label))]
    pub async fn fetch(&self) -> MutationResult<T> {
        let ticket = self.inner.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let is_latest = || self.inner.fetches.load(Ordering::SeqCst) == ticket;
        self.apply(|state| state.begin_loading())?;

        let load = (self.inner.loader)(self.inner.client.clone());
        match self.inner.teardown.guard(load).await? {
            Ok(data) => {
                let kept = data.clone();
                self.apply(|state| {
                    if is_latest() {
                        state.succeed(FetchState::Fetched(kept));
                    }
                })?;
                Ok(data)
            }
            Err(e) => {
                tracing::warn!("failed to load {}: {e}", self.inner.label);
                let message = e.to_string();
                self.apply(|state| {
                    if is_latest() {
                        state.fail(message);
                    }
                })?;
                Err(e.into())
            }
        }
    }

    pub async fn refetch(&self) -> MutationResult<T> {
        self.fetch().await
    }
}

impl AggregateStore<DashboardStats> {
    pub fn dashboard(ctx: &StoreContext) -> Self {
        Self::new(ctx, "dashboard stats", |client| async move {
            DashboardStats::load(&client).await
        })
    }
}

impl AggregateStore<Reports> {
    pub fn reports(ctx: &StoreContext) -> Self {
        Self::new(ctx, "reports", |client| async move {
            Reports::load(&client).await
        })
    }
}

impl AggregateStore<Vec<Worker>> {
    pub fn top_workers(ctx: &StoreContext, n: usize) -> Self {
        Self::new(ctx, "top workers", move |client| async move {
            let workers = fetch_collection::<Worker>(&client).await?;
            Ok(top_workers(workers, n))
        })
    }
}

impl AggregateStore<Vec<Booking>> {
    pub fn recent_bookings(ctx: &StoreContext, limit: usize) -> Self {
        Self::new(ctx, "recent bookings", move |client| async move {
            let bookings = fetch_collection::<Booking>(&client).await?;
            Ok(recent_bookings(bookings, limit))
        })
    }
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_workers: usize,
    pub active_workers: usize,
    pub available_workers: usize,
    pub total_categories: usize,
    pub total_bookings: usize,
    pub bookings_by_status: BTreeMap<String, usize>,
    pub total_payments: usize,
    pub total_revenue: Decimal,
    pub total_commission: Decimal,
    pub total_complaints: usize,
    pub open_complaints: usize,
    pub total_promo_codes: usize,
    pub active_promo_codes: usize,
}

impl DashboardStats {
    pub async fn load(client: &APIClient) -> Result<Self, ClientError> {
        let (
            users,
            workers,
            categories,
            bookings,
            payments,
            complaints,
            promos,
        ) = futures::try_join!(
            fetch_collection::<User>(client),
            fetch_collection::<Worker>(client),
            fetch_collection::<Category>(client),
            fetch_collection::<Booking>(client),
            fetch_collection::<Payment>(client),
            fetch_collection::<Complaint>(client),
            fetch_collection::<PromoCode>(client),
        )?;
        Ok(Self::compute(
            &users,
            &workers,
            &categories,
            &bookings,
            &payments,
            &complaints,
            &promos,
        ))
    }

    pub fn compute(
        users: &[User],
        workers: &[Worker],
        categories: &[Category],
        bookings: &[Booking],
        payments: &[Payment],
        complaints: &[Complaint],
        promos: &[PromoCode],
    ) -> Self {
        let mut bookings_by_status = BTreeMap::new();
        for booking in bookings {
            *bookings_by_status.entry(booking.status.clone()).or_default() += 1;
        }
        Self {
            total_users: users.len(),
            total_workers: workers.len(),
            active_workers: workers
                .iter()
                .filter(|w| w.status.eq_ignore_ascii_case("active"))
                .count(),
            available_workers: workers.iter().filter(|w| w.available).count(),
            total_categories: categories.len(),
            total_bookings: bookings.len(),
            bookings_by_status,
            total_payments: payments.len(),
            total_revenue: payments.iter().map(|p| p.amount).sum(),
            total_commission: payments.iter().map(|p| p.commission).sum(),
            total_complaints: complaints.len(),
            open_complaints: complaints.iter().filter(|c| c.is_open()).count(),
            total_promo_codes: promos.len(),
            active_promo_codes: promos.iter().filter(|p| p.is_active()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatusTally {
    pub count: usize,
    pub amount: Decimal,
}

/// Booking and earnings breakdowns for the reports page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Reports {
    pub total_bookings: usize,
    pub bookings_by_status: BTreeMap<String, StatusTally>,
    /// Booked amount per service, keyed by service name.
    pub revenue_by_service: BTreeMap<String, Decimal>,
    pub average_booking_amount: Decimal,
    pub total_revenue: Decimal,
    pub worker_earnings: Decimal,
    pub platform_commission: Decimal,
    pub payments_by_status: BTreeMap<String, usize>,
}

impl Reports {
    pub async fn load(client: &APIClient) -> Result<Self, ClientError> {
        let (bookings, payments) = futures::future::try_join(
            fetch_collection::<Booking>(client),
            fetch_collection::<Payment>(client),
        )
        .await?;
        Ok(Self::compute(&bookings, &payments))
    }

    pub fn compute(bookings: &[Booking], payments: &[Payment]) -> Self {
        let mut bookings_by_status: BTreeMap<String, StatusTally> =
            BTreeMap::new();
        let mut revenue_by_service: BTreeMap<String, Decimal> =
            BTreeMap::new();
        for booking in bookings {
            let tally = bookings_by_status
                .entry(booking.status.clone())
                .or_default();
            tally.count += 1;
            tally.amount += booking.amount;

            let service = if booking.service_name.is_empty() {
                "Unknown".to_string()
            } else {
                booking.service_name.clone()
            };
            *revenue_by_service.entry(service).or_default() += booking.amount;
        }

        let booked: Decimal = bookings.iter().map(|b| b.amount).sum();
        let average_booking_amount = if bookings.is_empty() {
            Decimal::ZERO
        } else {
            (booked / Decimal::from(bookings.len())).round_dp(2)
        };

        let mut payments_by_status = BTreeMap::new();
        for payment in payments {
            *payments_by_status.entry(payment.status.clone()).or_default() += 1;
        }

        Self {
            total_bookings: bookings.len(),
            bookings_by_status,
            revenue_by_service,
            average_booking_amount,
            total_revenue: payments.iter().map(|p| p.amount).sum(),
            worker_earnings: payments.iter().map(|p| p.worker_amount).sum(),
            platform_commission: payments.iter().map(|p| p.commission).sum(),
            payments_by_status,
        }
    }
}

/// Most completed jobs first, then best rated, then by name.
pub fn top_workers(mut workers: Vec<Worker>, n: usize) -> Vec<Worker> {
    workers.sort_by(|a, b| {
        b.completed_jobs
            .cmp(&a.completed_jobs)
            .then_with(|| b.rating.cmp(&a.rating))
            .then_with(|| a.name.cmp(&b.name))
    });
    workers.truncate(n);
    workers
}

/// Newest first by `created_at`; rows without one go last. Server order
/// breaks ties.
pub fn recent_bookings(
    mut bookings: Vec<Booking>,
    limit: usize,
) -> Vec<Booking> {
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    bookings.truncate(limit);
    bookings
}
