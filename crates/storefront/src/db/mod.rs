//! Database operations for the storefront `PostgreSQL` database.
//!
//! # Tables
//!
//! - `shop` - Shops served by this deployment
//! - `currency` / `currency_shop` - Currency catalog and shop availability
//! - `config` - Host key-value configuration store
//! - `tower_sessions.session` - Visitor session storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p coastline-cli -- migrate
//! ```

pub mod config;
pub mod currencies;

pub use config::PgConfigStore;
pub use currencies::PgCurrencyCatalog;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
