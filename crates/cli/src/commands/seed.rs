//! Database seeding command.
//!
//! Inserts a demo shop and a small currency catalog so a fresh deployment
//! has something to configure. Idempotent: re-running leaves existing rows
//! untouched.

use sqlx::PgPool;

use super::{CommandError, connect};

/// Currencies seeded for the demo shop.
const CURRENCIES: &[(&str, &str)] = &[
    ("Euro", "EUR"),
    ("US Dollar", "USD"),
    ("Pound Sterling", "GBP"),
];

/// Seed the database with a demo shop and currency catalog.
///
/// # Errors
///
/// Returns an error if the environment is missing the database URL, the
/// connection fails, or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let shop_id = seed_shop(&pool).await?;
    for (name, iso_code) in CURRENCIES {
        let currency_id = seed_currency(&pool, name, iso_code).await?;
        link_currency_to_shop(&pool, currency_id, shop_id).await?;
    }

    tracing::info!(shop_id, "Seed complete");
    Ok(())
}

/// Insert the demo shop if absent and return its ID.
async fn seed_shop(pool: &PgPool) -> Result<i32, CommandError> {
    let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM shop WHERE name = $1")
        .bind("Coastline Supply Co.")
        .fetch_optional(pool)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let id: i32 = sqlx::query_scalar("INSERT INTO shop (name) VALUES ($1) RETURNING id")
        .bind("Coastline Supply Co.")
        .fetch_one(pool)
        .await?;
    tracing::info!(shop_id = id, "Created demo shop");
    Ok(id)
}

/// Insert a currency if absent and return its ID.
async fn seed_currency(pool: &PgPool, name: &str, iso_code: &str) -> Result<i32, CommandError> {
    let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM currency WHERE iso_code = $1")
        .bind(iso_code)
        .fetch_optional(pool)
        .await?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let id: i32 =
        sqlx::query_scalar("INSERT INTO currency (name, iso_code) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(iso_code)
            .fetch_one(pool)
            .await?;
    tracing::info!(currency_id = id, iso_code, "Created currency");
    Ok(id)
}

/// Make a currency available to a shop.
async fn link_currency_to_shop(
    pool: &PgPool,
    currency_id: i32,
    shop_id: i32,
) -> Result<(), CommandError> {
    sqlx::query(
        r"
        INSERT INTO currency_shop (currency_id, shop_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(currency_id)
    .bind(shop_id)
    .execute(pool)
    .await?;
    Ok(())
}
