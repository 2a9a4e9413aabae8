//! Observable state shared by every store.

/// Lifecycle of the most recent load.
///
/// `Idle → Loading → {Ready, Failed}`, and back to `Loading` on every
/// refetch. There is no separate "stale" phase: a failed refetch keeps the
/// previous data alongside the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Distinguishes "not loaded yet" from "loaded and empty".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreState<T> {
    pub data: T,
    pub phase: Phase,
    /// Message of the last failed load, cleared by the next success.
    pub error: Option<String>,
}

impl<T> StoreState<T> {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub(crate) fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.data = data;
        self.phase = Phase::Ready;
        self.error = None;
    }

    /// Finish loading without replacing the data.
    pub(crate) fn settle(&mut self) {
        self.phase = Phase::Ready;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.phase = Phase::Failed;
        self.error = Some(message);
    }
}

/// State of a [`CollectionStore`](crate::CollectionStore).
pub type CollectionState<E> = StoreState<Vec<E>>;

impl<E> StoreState<Vec<E>> {
    pub fn items(&self) -> &[E] {
        &self.data
    }
}

/// State of an [`AggregateStore`](crate::AggregateStore).
pub type AggregateState<T> = StoreState<FetchState<T>>;
