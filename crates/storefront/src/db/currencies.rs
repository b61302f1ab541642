//! `PostgreSQL` implementation of the currency catalog.

use async_trait::async_trait;
use sqlx::PgPool;

use coastline_core::{CatalogError, Currency, CurrencyCatalog, CurrencyId, ShopId};

/// `PostgreSQL`-backed [`CurrencyCatalog`].
#[derive(Clone)]
pub struct PgCurrencyCatalog {
    pool: PgPool,
}

impl PgCurrencyCatalog {
    /// Create a catalog over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape for catalog queries.
#[derive(sqlx::FromRow)]
struct CurrencyRow {
    id: i32,
    name: String,
    iso_code: String,
}

impl From<CurrencyRow> for Currency {
    fn from(row: CurrencyRow) -> Self {
        Self {
            id: CurrencyId::new(row.id),
            name: row.name,
            iso_code: row.iso_code,
        }
    }
}

#[async_trait]
impl CurrencyCatalog for PgCurrencyCatalog {
    async fn currencies_for_shop(&self, shop: ShopId) -> Result<Vec<Currency>, CatalogError> {
        let rows: Vec<CurrencyRow> = sqlx::query_as(
            r"
            SELECT c.id, c.name, c.iso_code
            FROM currency c
            JOIN currency_shop cs ON cs.currency_id = c.id
            WHERE cs.shop_id = $1 AND c.active
            ORDER BY c.name
            ",
        )
        .bind(shop.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(CatalogError::backend)?;

        Ok(rows.into_iter().map(Currency::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = CurrencyRow {
            id: 2,
            name: "US Dollar".to_string(),
            iso_code: "USD".to_string(),
        };
        let currency = Currency::from(row);
        assert_eq!(currency.id, CurrencyId::new(2));
        assert_eq!(currency.iso_code, "USD");
    }
}
