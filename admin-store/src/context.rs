use std::sync::Arc;

use payloads::APIClient;

use crate::{Config, Reconcile, TimeSource, ToastHandle};

/// Everything a store needs from its surroundings. Cloning shares the
/// client, the toast list and the clock.
#[derive(Clone)]
pub struct StoreContext {
    pub client: Arc<APIClient>,
    pub toasts: ToastHandle,
    pub time: TimeSource,
    /// Policy given to stores created from this context.
    pub reconcile: Reconcile,
}

impl StoreContext {
    pub fn new(config: &Config, time: TimeSource) -> Self {
        Self {
            client: Arc::new(APIClient::new(config.api_url.as_str())),
            toasts: ToastHandle::new(config.toast_ms),
            time,
            reconcile: config.reconcile,
        }
    }

    pub fn with_reconcile(mut self, reconcile: Reconcile) -> Self {
        self.reconcile = reconcile;
        self
    }
}
