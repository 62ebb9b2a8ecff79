//! Kinetyk HTTP API.
//!
//! Exposes the query boundary as a versioned namespace (`/api/v1`):
//! list, get-by-id, batch, search, facets, and a version endpoint. Every
//! `/api` response carries the current data version and a short cache TTL
//! so clients can decide whether to refetch.
//!
//! Serving is stateless per request over a shared immutable snapshot;
//! static asset files are served by an external collaborator, not here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{ServerConfig, build_router, serve};

use kinetyk_query::QueryEngine;

/// API namespace version.
pub const API_VERSION: &str = "v1";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Query engine over the loaded snapshot.
    pub engine: QueryEngine,
}

impl AppState {
    /// Create state around a query engine.
    pub fn new(engine: QueryEngine) -> Self {
        Self { engine }
    }
}
