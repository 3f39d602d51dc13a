//! Shared handler state.

use axum::http::HeaderMap;
use common::{Error, InstrumentId, Result, Timestamp};
use config_store::{ConfigStore, InMemoryConfigStore};
use instrument::{InMemoryInstrumentStore, InstrumentStore};
use observability::StoreMetrics;
use snapshot::{InMemorySnapshotStore, SnapshotStore};
use std::sync::Arc;

/// Header carrying the acting user for audit and version attribution.
pub const USER_HEADER: &str = "x-user";

/// Store handles plus request-independent settings, created once at
/// startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub instruments: Arc<dyn InstrumentStore>,
    pub configs: Arc<dyn ConfigStore>,
    pub snapshots: Arc<dyn SnapshotStore>,
    pub default_user: String,
    pub metrics: StoreMetrics,
}

impl AppState {
    pub fn new(
        instruments: Arc<dyn InstrumentStore>,
        configs: Arc<dyn ConfigStore>,
        snapshots: Arc<dyn SnapshotStore>,
        default_user: impl Into<String>,
    ) -> Self {
        Self {
            instruments,
            configs,
            snapshots,
            default_user: default_user.into(),
            metrics: StoreMetrics::new(),
        }
    }

    /// All three stores in memory
    pub fn in_memory(default_user: impl Into<String>) -> Self {
        Self::new(
            Arc::new(InMemoryInstrumentStore::new()),
            Arc::new(InMemoryConfigStore::new()),
            Arc::new(InMemorySnapshotStore::new()),
            default_user,
        )
    }

    /// `X-User` header if present and non-blank, else the configured default.
    pub fn acting_user(&self, headers: &HeaderMap) -> String {
        headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_user.clone())
    }

    /// Creation time of the current configuration, if any.
    pub async fn last_updated(&self, id: &InstrumentId) -> Result<Option<Timestamp>> {
        match self.configs.try_current(id).await {
            Ok(current) => Ok(current.map(|v| v.created_at)),
            // Registered in the registry but not yet in the config store.
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_acting_user() {
        let state = AppState::in_memory("admin");
        let mut headers = HeaderMap::new();
        assert_eq!(state.acting_user(&headers), "admin");

        headers.insert(USER_HEADER, HeaderValue::from_static("  "));
        assert_eq!(state.acting_user(&headers), "admin");

        headers.insert(USER_HEADER, HeaderValue::from_static("alice"));
        assert_eq!(state.acting_user(&headers), "alice");
    }
}
