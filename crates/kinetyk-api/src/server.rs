//! Router assembly and server startup.

use crate::{AppState, routes};
use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use kinetyk_core::{Error, Result};
use serde::Deserialize;

/// Header carrying the current dataset version on every `/api` response.
pub const DATA_VERSION_HEADER: &str = "x-data-version";

/// Short freshness window for data responses; asset serving (long TTL) is
/// an external collaborator.
const DATA_CACHE_CONTROL: &str = "public, max-age=300";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5730
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Stamp the data version and cache headers onto every `/api` response.
async fn stamp_data_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(state.engine.data_version()) {
        response.headers_mut().insert(DATA_VERSION_HEADER, value);
    }
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(DATA_CACHE_CONTROL),
    );
    response
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/exercises", get(routes::list_exercises))
        .route("/exercises/search", get(routes::search_exercises))
        .route("/exercises/batch", get(routes::batch_exercises))
        .route("/exercises/{id}", get(routes::get_exercise))
        .route("/facets/categories", get(routes::category_facets))
        .route("/facets/muscles", get(routes::muscle_facets))
        .route("/facets/equipment", get(routes::equipment_facets))
        .route("/version", get(routes::version))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            stamp_data_headers,
        ));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(routes::health))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::operation(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("kinetyk API listening on http://{addr}");
    tracing::info!("health check: http://{addr}/health");

    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| Error::operation(format!("server error: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
