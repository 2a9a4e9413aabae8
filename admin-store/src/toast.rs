//! Transient user notifications raised by mutators.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use uuid::Uuid;

pub const DEFAULT_TOAST_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    pub duration: Option<u32>, // milliseconds, None for no auto-dismiss
}

impl Toast {
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            toast_type,
            duration: Some(DEFAULT_TOAST_MS),
        }
    }

    pub fn error(message: String) -> Self {
        Self::new(message, ToastType::Error)
    }

    pub fn success(message: String) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn info(message: String) -> Self {
        Self::new(message, ToastType::Info)
    }

    pub fn duration(mut self, duration_ms: u32) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    pub fn no_auto_dismiss(mut self) -> Self {
        self.duration = None;
        self
    }
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
    Clear,
}

impl ToastState {
    pub fn reduce(&mut self, action: ToastAction) {
        match action {
            ToastAction::Add(toast) => {
                self.toasts.retain(|t| t.id != toast.id);
                self.toasts.push(toast);
            }
            ToastAction::Remove(id) => {
                self.toasts.retain(|t| t.id != id);
            }
            ToastAction::Clear => {
                self.toasts.clear();
            }
        }
    }
}

/// Cheaply cloneable handle; all clones share one toast list.
#[derive(Clone, Debug)]
pub struct ToastHandle {
    state: Arc<Mutex<ToastState>>,
    /// Auto-dismiss applied by the `error`/`success`/`info` shorthands.
    default_duration: Option<u32>,
}

impl Default for ToastHandle {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TOAST_MS))
    }
}

impl ToastHandle {
    pub fn new(default_duration: Option<u32>) -> Self {
        Self {
            state: Arc::default(),
            default_duration,
        }
    }

    fn dispatch(&self, action: ToastAction) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reduce(action);
    }

    pub fn add(&self, toast: Toast) {
        let toast_id = toast.id;
        let duration = toast.duration;
        self.dispatch(ToastAction::Add(toast));

        // Outside a runtime the toast simply stays until removed.
        if let Some(duration_ms) = duration
            && let Ok(runtime) = tokio::runtime::Handle::try_current()
        {
            let handle = self.clone();
            runtime.spawn(async move {
                tokio::time::sleep(Duration::from_millis(duration_ms.into()))
                    .await;
                handle.remove(toast_id);
            });
        }
    }

    fn with_default(&self, toast: Toast) -> Toast {
        match self.default_duration {
            Some(ms) => toast.duration(ms),
            None => toast.no_auto_dismiss(),
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(self.with_default(Toast::error(message.into())));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(self.with_default(Toast::success(message.into())));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.add(self.with_default(Toast::info(message.into())));
    }

    pub fn remove(&self, id: Uuid) {
        self.dispatch(ToastAction::Remove(id));
    }

    pub fn clear(&self) {
        self.dispatch(ToastAction::Clear);
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .toasts
            .clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts().pop()
    }
}
