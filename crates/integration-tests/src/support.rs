//! Shared helpers for integration tests.
//!
//! Builds the storefront application over the in-memory host collaborators
//! and an in-memory session store, and provides small HTTP helpers for
//! driving it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use coastline_core::{
    Currency, CurrencyId, LanguageId, MemoryConfigStore, MemoryCurrencyCatalog, ShopId,
};
use coastline_storefront::config::StorefrontConfig;
use coastline_storefront::routes;
use coastline_storefront::state::AppState;

/// Shop context every test app serves.
pub const SHOP: ShopId = ShopId::new(1);

/// Catalog IDs seeded into every test app.
pub const EUR: CurrencyId = CurrencyId::new(1);
pub const USD: CurrencyId = CurrencyId::new(2);

/// Storefront configuration for tests (never connects anywhere).
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://localhost/coastline_test"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        shop_id: SHOP,
        language_id: LanguageId::new(1),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build the storefront app over in-memory collaborators.
///
/// Returns the router plus the config store, so tests can inspect and adjust
/// persisted settings directly. The database pool is lazy and is never
/// touched by these routes.
#[must_use]
pub fn test_app() -> (Router, Arc<MemoryConfigStore>) {
    let config_store = Arc::new(MemoryConfigStore::new());

    let mut catalog = MemoryCurrencyCatalog::new();
    catalog.set_shop_currencies(
        SHOP,
        vec![
            Currency::new(EUR, "Euro", "EUR"),
            Currency::new(USD, "US Dollar", "USD"),
        ],
    );

    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/coastline_test")
        .expect("valid database url");

    let state = AppState::with_collaborators(
        test_config(),
        pool,
        config_store.clone(),
        Arc::new(catalog),
    );

    let session_layer = SessionManagerLayer::new(MemoryStore::default());
    (routes::app(state, session_layer), config_store)
}

/// Send a GET request, optionally replaying a session cookie.
///
/// # Panics
///
/// Panics if the request cannot be built or routed.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::empty()).expect("valid request");
    app.clone().oneshot(request).await.expect("route request")
}

/// Send a POST with a urlencoded form body.
///
/// # Panics
///
/// Panics if the request cannot be built or routed.
pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    app.clone().oneshot(request).await.expect("route request")
}

/// Extract the session cookie pair (`name=value`) from a response, if set.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?;
    let raw = set_cookie.to_str().ok()?;
    Some(raw.split(';').next().unwrap_or(raw).to_string())
}

/// Collect a response body into a string.
///
/// # Panics
///
/// Panics if the body cannot be collected or is not UTF-8.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
