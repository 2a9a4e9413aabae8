//! Cancellation of in-flight work when a store is torn down.

use std::future::Future;

use tokio::sync::watch;

use crate::{MutationResult, StoreError};

/// Shared "this store is gone" signal. Every network call a store makes is
/// raced against it.
#[derive(Debug)]
pub(crate) struct Teardown {
    signal: watch::Sender<bool>,
}

impl Teardown {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self { signal }
    }

    pub fn fire(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_fired(&self) -> bool {
        *self.signal.borrow()
    }

    pub fn ensure_live(&self) -> MutationResult<()> {
        if self.is_fired() {
            Err(StoreError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Run `operation` unless the store is torn down first. A future that
    /// loses the race is dropped, which aborts its request.
    pub async fn guard<F: Future>(
        &self,
        operation: F,
    ) -> MutationResult<F::Output> {
        let mut fired = self.signal.subscribe();
        tokio::select! {
            biased;
            _ = fired.wait_for(|down| *down) => Err(StoreError::Cancelled),
            output = operation => Ok(output),
        }
    }
}
