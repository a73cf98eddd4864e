//! Stand-in grade API server: configuration, storage, handlers, and lifecycle.
//!
//! Serves the same three endpoints as the hosted grade API from an in-memory
//! store, for local development and integration tests.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod module;
pub mod store;

pub use config::*;
pub use handlers::AppState;
pub use module::ServerModule;
pub use store::StudentStore;
