//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                  - Home page (front office)
//! GET  /health                            - Liveness check
//! GET  /health/ready                      - Readiness check (DB ping)
//!
//! # Back office
//! GET  /admin/modules/default-currency    - Default currency settings form
//! POST /admin/modules/default-currency    - Save settings
//! ```

pub mod admin;
pub mod home;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::middleware;
use crate::state::AppState;

/// Create the front-office routes router.
///
/// Every route here runs behind the plugin request-start dispatch.
pub fn front_office_routes() -> Router<AppState> {
    Router::new().route("/", get(home::home))
}

/// Create the back-office routes router.
pub fn back_office_routes() -> Router<AppState> {
    Router::new().route(
        "/modules/default-currency",
        get(admin::settings_page).post(admin::save_settings),
    )
}

/// Assemble the application router.
///
/// The plugin dispatch middleware wraps front-office routes only; the
/// session layer wraps everything. Generic over the session store so the
/// binary can use the `PostgreSQL` store and tests the in-memory one.
pub fn app<Store>(state: AppState, session_layer: SessionManagerLayer<Store>) -> Router
where
    Store: SessionStore + Clone,
{
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(
            front_office_routes().route_layer(axum::middleware::from_fn_with_state(
                state.clone(),
                middleware::plugin_request_start,
            )),
        )
        .nest("/admin", back_office_routes())
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
