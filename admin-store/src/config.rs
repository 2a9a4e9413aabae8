use std::time::Duration;

use crate::toast::DEFAULT_TOAST_MS;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REFETCH_DEBOUNCE: Duration = Duration::from_millis(750);

/// How a store brings its collection back in line with the server after a
/// successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconcile {
    /// Apply the change locally; no refetch.
    #[default]
    Patch,
    /// Refetch the whole collection after every mutation.
    Refetch,
    /// Patch locally, then refetch once a burst of mutations has been
    /// quiet for `debounce`.
    PatchThenRefetch { debounce: Duration },
}

impl Reconcile {
    pub fn patches_locally(&self) -> bool {
        !matches!(self, Self::Refetch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without the `/api` suffix.
    pub api_url: String,
    pub reconcile: Reconcile,
    /// Toast auto-dismiss in milliseconds; `None` keeps toasts until removed.
    pub toast_ms: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            reconcile: Reconcile::default(),
            toast_ms: Some(DEFAULT_TOAST_MS),
        }
    }
}

impl Config {
    /// Read `ADMIN_API_URL`, `ADMIN_RECONCILE`, `ADMIN_REFETCH_DEBOUNCE_MS`
    /// and `ADMIN_TOAST_MS`. Unset variables take their defaults; invalid
    /// ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = var("ADMIN_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let debounce = match var("ADMIN_REFETCH_DEBOUNCE_MS") {
            None => DEFAULT_REFETCH_DEBOUNCE,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        "invalid ADMIN_REFETCH_DEBOUNCE_MS"
                    );
                    DEFAULT_REFETCH_DEBOUNCE
                }
            },
        };

        let reconcile = match var("ADMIN_RECONCILE").as_deref().map(str::trim) {
            None | Some("") | Some("patch") => Reconcile::Patch,
            Some("refetch") => Reconcile::Refetch,
            Some("patch-then-refetch") => {
                Reconcile::PatchThenRefetch { debounce }
            }
            Some(other) => {
                tracing::warn!(value = other, "invalid ADMIN_RECONCILE");
                defaults.reconcile
            }
        };

        let toast_ms = match var("ADMIN_TOAST_MS") {
            None => defaults.toast_ms,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(0) => None,
                Ok(ms) => Some(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "invalid ADMIN_TOAST_MS");
                    defaults.toast_ms
                }
            },
        };

        Self {
            api_url,
            reconcile,
            toast_ms,
        }
    }
}
