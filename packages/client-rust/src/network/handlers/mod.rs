//! HTTP handler definitions for the stand-in grade API.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod grade_api;

pub use grade_api::{create_handler, delete_handler, fetch_all_handler};

use std::sync::Arc;

use super::{NetworkConfig, StudentStore};

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references to shared resources so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Student table served by the grade endpoints.
    pub store: Arc<StudentStore>,
    /// Network configuration (bind address, accepted keys, timeouts).
    pub config: Arc<NetworkConfig>,
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState {
        store: Arc::new(StudentStore::new()),
        config: Arc::new(NetworkConfig::default()),
    }
}
