//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! coast-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! Migration files live in `crates/storefront/migrations/`.

use super::{CommandError, connect};

/// Run the storefront database migrations.
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL, the
/// connection fails, or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
