//! `PostgreSQL` implementation of the host configuration store.
//!
//! Values live in the `config` table keyed by `(name, shop_id)`, with
//! `shop_id IS NULL` meaning the global scope. Queries use the runtime sqlx
//! API so the crate builds without a live database.

use async_trait::async_trait;
use sqlx::PgPool;

use coastline_core::{ConfigScope, ConfigStore, ConfigStoreError};

/// `PostgreSQL`-backed [`ConfigStore`].
#[derive(Clone)]
pub struct PgConfigStore {
    pool: PgPool,
}

impl PgConfigStore {
    /// Create a store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `shop_id` column value for a scope (`NULL` = global).
const fn scope_shop_id(scope: ConfigScope) -> Option<i32> {
    match scope {
        ConfigScope::Global => None,
        ConfigScope::Shop(shop) => Some(shop.as_i32()),
    }
}

#[async_trait]
impl ConfigStore for PgConfigStore {
    async fn get(
        &self,
        name: &str,
        scope: ConfigScope,
    ) -> Result<Option<String>, ConfigStoreError> {
        let value: Option<String> = match scope {
            ConfigScope::Global => {
                sqlx::query_scalar(
                    r"
                    SELECT value FROM config
                    WHERE name = $1 AND shop_id IS NULL
                    ",
                )
                .bind(name)
                .fetch_optional(&self.pool)
                .await
            }
            // Shop-scoped lookups fall back to the global row.
            ConfigScope::Shop(shop) => {
                sqlx::query_scalar(
                    r"
                    SELECT value FROM config
                    WHERE name = $1 AND (shop_id = $2 OR shop_id IS NULL)
                    ORDER BY shop_id NULLS LAST
                    LIMIT 1
                    ",
                )
                .bind(name)
                .bind(shop.as_i32())
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(ConfigStoreError::backend)?;

        Ok(value)
    }

    async fn set(
        &self,
        name: &str,
        value: &str,
        scope: ConfigScope,
    ) -> Result<(), ConfigStoreError> {
        sqlx::query(
            r"
            INSERT INTO config (name, shop_id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (name, shop_id)
            DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            ",
        )
        .bind(name)
        .bind(scope_shop_id(scope))
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(ConfigStoreError::backend)?;

        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), ConfigStoreError> {
        sqlx::query("DELETE FROM config WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(ConfigStoreError::backend)?;

        Ok(())
    }
}
