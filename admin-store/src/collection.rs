//! The remote collection store.
//!
//! A [`CollectionStore`] mirrors one backend collection. It loads the whole
//! collection on mount, hands out snapshots, and funnels every mutation
//! through the entity's [`Resource`] implementation. Local state is only
//! touched after the server has confirmed a mutation, and then according to
//! the store's [`Reconcile`] policy.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use payloads::time::format_somalia_time;
use payloads::{
    APIClient, ClientError, Create, Delete, Echo, RawRecord, RecordId, Resource,
    ToForm, Update,
};

use crate::state::CollectionState;
use crate::teardown::Teardown;
use crate::{MutationResult, Reconcile, StoreContext, StoreError};

/// Cheaply cloneable handle to one entity's collection. All clones share
/// the same state.
pub struct CollectionStore<E> {
    inner: Arc<Inner<E>>,
}

impl<E> Clone for CollectionStore<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<E> {
    ctx: StoreContext,
    reconcile: Reconcile,
    state: Mutex<CollectionState<E>>,
    teardown: Teardown,
    /// Bumped by every fetch; only the newest fetch may write its result.
    fetches: AtomicU64,
    /// Bumped under the state lock by every confirmed mutation. A fetch
    /// that started before a mutation landed keeps the local items.
    writes: AtomicU64,
    /// Bumped by every mutation; a debounced refetch only runs if it is
    /// still the newest.
    mutations: AtomicU64,
}

impl<E: Resource> CollectionStore<E> {
    /// An idle store using the context's reconcile policy.
    pub fn new(ctx: &StoreContext) -> Self {
        Self::with_reconcile(ctx, ctx.reconcile)
    }

    pub fn with_reconcile(ctx: &StoreContext, reconcile: Reconcile) -> Self {
        Self {
            inner: Arc::new(Inner {
                ctx: ctx.clone(),
                reconcile,
                state: Mutex::new(CollectionState::default()),
                teardown: Teardown::new(),
                fetches: AtomicU64::new(0),
                writes: AtomicU64::new(0),
                mutations: AtomicU64::new(0),
            }),
        }
    }

    /// Create a store and load it. A failed load is reported through the
    /// store's state rather than returned.
    pub async fn mount(ctx: &StoreContext) -> Self {
        let store = Self::new(ctx);
        let _ = store.fetch_all().await;
        store
    }

    pub fn snapshot(&self) -> CollectionState<E> {
        self.lock().clone()
    }

    pub fn items(&self) -> Vec<E> {
        self.lock().data.clone()
    }

    pub fn get(&self, id: RecordId) -> Option<E> {
        self.lock().data.iter().find(|item| item.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn reconcile(&self) -> Reconcile {
        self.inner.reconcile
    }

    /// Stop the store. In-flight operations resolve to
    /// [`StoreError::Cancelled`] without touching state, and so does every
    /// later call.
    pub fn teardown(&self) {
        tracing::debug!(entity = E::LABEL, "store torn down");
        self.inner.teardown.fire();
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.teardown.is_fired()
    }

    fn lock(&self) -> MutexGuard<'_, CollectionState<E>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate the state, unless the store has been torn down.
    fn apply<R>(
        &self,
        f: impl FnOnce(&mut CollectionState<E>) -> R,
    ) -> MutationResult<R> {
        let mut state = self.lock();
        self.inner.teardown.ensure_live()?;
        Ok(f(&mut state))
    }

    /// Like [`Self::apply`], for a mutation the server has confirmed.
    fn apply_confirmed<R>(
        &self,
        f: impl FnOnce(&mut CollectionState<E>) -> R,
    ) -> MutationResult<R> {
        self.apply(|state| {
            self.inner.writes.fetch_add(1, Ordering::SeqCst);
            f(state)
        })
    }

    /// Replace the collection with the server's current contents.
    ///
    /// On failure the previous items are kept and the error message is
    /// recorded in the state.
    #[tracing::instrument(skip(self), fields(entity = E::LABEL))]
    pub async fn fetch_all(&self) -> MutationResult<()> {
        let ticket = self.inner.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        let is_latest = || self.inner.fetches.load(Ordering::SeqCst) == ticket;
        let writes = self.apply(|state| {
            state.begin_loading();
            self.inner.writes.load(Ordering::SeqCst)
        })?;
        let overtaken = || self.inner.writes.load(Ordering::SeqCst) != writes;

        let result = self
            .inner
            .teardown
            .guard(fetch_collection::<E>(&self.inner.ctx.client))
            .await?;
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "collection loaded");
                self.apply(|state| {
                    if !is_latest() {
                        return;
                    }
                    if overtaken() {
                        tracing::debug!("stale list dropped after a mutation");
                        state.settle();
                    } else {
                        state.succeed(items);
                    }
                })?;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to load {} list: {e}", E::LABEL);
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

    pub async fn refetch(&self) -> MutationResult<()> {
        self.fetch_all().await
    }

    /// Submit a new record.
    ///
    /// The form is stamped with `created_at`. On success the record is
    /// synthesized from the submitted fields and the identity the server
    /// echoed, falling back to a provisional id when it echoed none.
    #[tracing::instrument(skip_all, fields(entity = E::LABEL))]
    pub async fn create(&self, draft: &E::Draft) -> MutationResult<E>
    where
        E: Create,
    {
        self.inner.teardown.ensure_live()?;
        let ctx = &self.inner.ctx;
        let mut form = draft.to_form();
        form.set("created_at", format_somalia_time(ctx.time.now()));
        let submitted = form.to_raw();

        let echo = match self
            .inner
            .teardown
            .guard(E::create(&ctx.client, form))
            .await?
        {
            Ok(echo) => echo,
            Err(e) => return Err(self.failed("create", e)),
        };

        let echoed = echo.id(E::ID_KEYS);
        let patch = self.inner.reconcile.patches_locally();
        let now_ms = ctx.time.now().as_millisecond();
        let record = self.apply_confirmed(|state| {
            let id = echoed
                .unwrap_or_else(|| provisional_id(&state.data, now_ms));
            let record: E = synthesize(submitted, &echo, id);
            if patch {
                insert_newest(&mut state.data, record.clone());
            }
            record
        })?;
        if echoed.is_none() {
            tracing::warn!(
                id = %record.id(),
                "no id in create response, using provisional id"
            );
        }

        tracing::info!(id = %record.id(), "{} created", E::LABEL);
        ctx.toasts
            .success(format!("{} created successfully", capitalized(E::LABEL)));
        self.reconciled().await?;

        if patch {
            Ok(record)
        } else {
            Ok(echoed.and_then(|id| self.get(id)).unwrap_or(record))
        }
    }

    /// Send the changed fields of one record. On success the same fields
    /// are shallow-merged into the local copy, which is returned when the
    /// collection holds one.
    #[tracing::instrument(skip(self, patch), fields(entity = E::LABEL))]
    pub async fn update(
        &self,
        id: RecordId,
        patch: &E::Patch,
    ) -> MutationResult<Option<E>>
    where
        E: Update,
    {
        self.inner.teardown.ensure_live()?;
        let current = self.get(id);
        let changes = patch.to_form().to_raw();

        let outcome = self
            .inner
            .teardown
            .guard(E::update(
                &self.inner.ctx.client,
                id,
                current.as_ref(),
                patch,
            ))
            .await?;
        if let Err(e) = outcome {
            return Err(self.failed("update", e));
        }

        let patch_locally = self.inner.reconcile.patches_locally();
        let updated = self.apply_confirmed(|state| {
            patch_locally
                .then(|| merge_into(&mut state.data, id, changes))
                .flatten()
        })?;

        tracing::info!("{} updated", E::LABEL);
        self.inner
            .ctx
            .toasts
            .success(format!("{} updated successfully", capitalized(E::LABEL)));
        self.reconciled().await?;

        if patch_locally {
            Ok(updated)
        } else {
            Ok(self.get(id))
        }
    }

    /// Delete one record. Deleting an id the collection does not hold
    /// still asks the server, and leaves the collection as it is.
    #[tracing::instrument(skip(self), fields(entity = E::LABEL))]
    pub async fn delete(&self, id: RecordId) -> MutationResult<()>
    where
        E: Delete,
    {
        self.inner.teardown.ensure_live()?;
        let current = self.get(id);

        let outcome = self
            .inner
            .teardown
            .guard(E::delete(&self.inner.ctx.client, id, current.as_ref()))
            .await?;
        if let Err(e) = outcome {
            return Err(self.failed("delete", e));
        }

        let patch_locally = self.inner.reconcile.patches_locally();
        self.apply_confirmed(|state| {
            if patch_locally {
                state.data.retain(|item| item.id() != id);
            }
        })?;

        tracing::info!("{} deleted", E::LABEL);
        self.inner
            .ctx
            .toasts
            .success(format!("{} deleted successfully", capitalized(E::LABEL)));
        self.reconciled().await
    }

    fn failed(&self, action: &str, e: ClientError) -> StoreError {
        tracing::error!("failed to {action} {}: {e}", E::LABEL);
        self.inner
            .ctx
            .toasts
            .error(format!("Failed to {action} {}: {e}", E::LABEL));
        e.into()
    }

    /// Follow a confirmed mutation according to the reconcile policy.
    async fn reconciled(&self) -> MutationResult<()> {
        match self.inner.reconcile {
            Reconcile::Patch => Ok(()),
            // A failed refetch is recorded in the state; the mutation itself
            // went through.
            Reconcile::Refetch => match self.fetch_all().await {
                Err(StoreError::Cancelled) => Err(StoreError::Cancelled),
                _ => Ok(()),
            },
            Reconcile::PatchThenRefetch { debounce } => {
                self.schedule_refetch(debounce);
                Ok(())
            }
        }
    }

    fn schedule_refetch(&self, debounce: Duration) {
        let burst = self.inner.mutations.fetch_add(1, Ordering::SeqCst) + 1;
        let store = self.clone();
        tokio::spawn(async move {
            if store
                .inner
                .teardown
                .guard(tokio::time::sleep(debounce))
                .await
                .is_err()
            {
                return;
            }
            if store.inner.mutations.load(Ordering::SeqCst) == burst {
                tracing::debug!(entity = E::LABEL, "background refetch");
                let _ = store.fetch_all().await;
            }
        });
    }
}

/// Load and normalize a whole collection.
pub async fn fetch_collection<E: Resource>(
    client: &APIClient,
) -> Result<Vec<E>, ClientError> {
    let rows = client.list(E::LIST).await?;
    Ok(normalize_rows(&rows))
}

/// Normalize rows in server order, keeping the first row of each identity.
pub fn normalize_rows<E: Resource>(rows: &[RawRecord]) -> Vec<E> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let item = E::normalize(row);
        if seen.insert(item.id()) {
            items.push(item);
        } else {
            tracing::warn!(
                entity = E::LABEL,
                id = %item.id(),
                "duplicate row dropped"
            );
        }
    }
    items
}

fn synthesize<E: Resource>(
    submitted: RawRecord,
    echo: &Echo,
    id: RecordId,
) -> E {
    let mut raw = submitted;
    raw.overlay(echo.carried.clone());
    raw.insert(E::ID_KEYS[0], id.0);
    E::normalize(&raw)
}

/// Newest first. A record whose identity is already present replaces that
/// row in place.
fn insert_newest<E: Resource>(items: &mut Vec<E>, record: E) {
    match items.iter_mut().find(|item| item.id() == record.id()) {
        Some(existing) => *existing = record,
        None => items.insert(0, record),
    }
}

/// The current time in milliseconds, bumped until unused.
fn provisional_id<E: Resource>(items: &[E], now_ms: i64) -> RecordId {
    let mut candidate = now_ms;
    while items.iter().any(|item| item.id().0 == candidate) {
        candidate += 1;
    }
    RecordId(candidate)
}

fn merge_into<E: Resource>(
    items: &mut [E],
    id: RecordId,
    changes: RawRecord,
) -> Option<E> {
    let item = items.iter_mut().find(|item| item.id() == id)?;
    let mut raw = RawRecord::from_serialize(&*item);
    raw.overlay(changes);
    raw.insert(E::ID_KEYS[0], id.0);
    *item = E::normalize(&raw);
    Some(item.clone())
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
