//! Read-only currency catalog query.
//!
//! The host owns the currency catalog; plugins only list it (to populate the
//! back-office dropdown) and check membership (to validate a submitted ID).

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Currency, CurrencyId, ShopId};

/// Errors from the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The underlying store failed (connection, query, corruption).
    #[error("currency catalog backend error: {0}")]
    Backend(String),
}

impl CatalogError {
    /// Wrap a backend failure.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Host-provided currency catalog.
#[async_trait]
pub trait CurrencyCatalog: Send + Sync {
    /// Currencies available to `shop`, in display order.
    async fn currencies_for_shop(&self, shop: ShopId) -> Result<Vec<Currency>, CatalogError>;

    /// Whether `currency` is available to `shop`.
    async fn contains(&self, shop: ShopId, currency: CurrencyId) -> Result<bool, CatalogError> {
        let currencies = self.currencies_for_shop(shop).await?;
        Ok(currencies.iter().any(|c| c.id == currency))
    }
}

/// In-memory [`CurrencyCatalog`] for tests and single-process tooling.
#[derive(Debug, Default)]
pub struct MemoryCurrencyCatalog {
    by_shop: HashMap<ShopId, Vec<Currency>>,
}

impl MemoryCurrencyCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `currencies` available to `shop`, replacing any previous list.
    pub fn set_shop_currencies(&mut self, shop: ShopId, currencies: Vec<Currency>) {
        self.by_shop.insert(shop, currencies);
    }
}

#[async_trait]
impl CurrencyCatalog for MemoryCurrencyCatalog {
    async fn currencies_for_shop(&self, shop: ShopId) -> Result<Vec<Currency>, CatalogError> {
        Ok(self.by_shop.get(&shop).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog_with_eur_usd(shop: ShopId) -> MemoryCurrencyCatalog {
        let mut catalog = MemoryCurrencyCatalog::new();
        catalog.set_shop_currencies(
            shop,
            vec![
                Currency::new(CurrencyId::new(1), "Euro", "EUR"),
                Currency::new(CurrencyId::new(2), "US Dollar", "USD"),
            ],
        );
        catalog
    }

    #[tokio::test]
    async fn test_currencies_for_shop() {
        let shop = ShopId::new(1);
        let catalog = catalog_with_eur_usd(shop);

        let currencies = catalog.currencies_for_shop(shop).await.unwrap();
        assert_eq!(currencies.len(), 2);
        assert_eq!(currencies[0].iso_code, "EUR");
    }

    #[tokio::test]
    async fn test_unknown_shop_is_empty() {
        let catalog = catalog_with_eur_usd(ShopId::new(1));
        let currencies = catalog.currencies_for_shop(ShopId::new(9)).await.unwrap();
        assert!(currencies.is_empty());
    }

    #[tokio::test]
    async fn test_contains() {
        let shop = ShopId::new(1);
        let catalog = catalog_with_eur_usd(shop);

        assert!(catalog.contains(shop, CurrencyId::new(2)).await.unwrap());
        assert!(!catalog.contains(shop, CurrencyId::new(99)).await.unwrap());
    }
}
