//! Host key-value configuration API.
//!
//! The platform persists administrative settings as named string values,
//! optionally scoped to a single shop. Reads resolve the shop scope first and
//! fall back to the global scope, so a value written globally applies to
//! every shop that has not overridden it.
//!
//! Writes are last-write-wins; settings change rarely and always from the
//! back office, so no stronger guarantee is offered.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::ShopId;

/// Scope a configuration value is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigScope {
    /// Applies to every shop unless a shop-scoped value overrides it.
    Global,
    /// Applies to a single shop.
    Shop(ShopId),
}

/// Errors from the configuration backend.
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    /// The underlying store failed (connection, query, corruption).
    #[error("configuration backend error: {0}")]
    Backend(String),
}

impl ConfigStoreError {
    /// Wrap a backend failure.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Host-provided key-value configuration store.
///
/// Implementations must uphold the scope-fallback contract on `get`: a lookup
/// under [`ConfigScope::Shop`] that finds no shop-scoped value returns the
/// global value if one exists.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Look up `name` under `scope`, falling back to the global scope.
    ///
    /// Returns `None` when the name has never been set or was deleted.
    async fn get(&self, name: &str, scope: ConfigScope)
    -> Result<Option<String>, ConfigStoreError>;

    /// Persist `value` under `name` in `scope`, overwriting any previous value.
    async fn set(
        &self,
        name: &str,
        value: &str,
        scope: ConfigScope,
    ) -> Result<(), ConfigStoreError>;

    /// Remove `name` from every scope.
    async fn delete(&self, name: &str) -> Result<(), ConfigStoreError>;
}

/// In-memory [`ConfigStore`] for tests and single-process tooling.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: Mutex<HashMap<(String, ConfigScope), String>>,
}

impl MemoryConfigStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(
        &self,
        name: &str,
        scope: ConfigScope,
    ) -> Result<Option<String>, ConfigStoreError> {
        let values = self
            .values
            .lock()
            .map_err(|_| ConfigStoreError::Backend("config store lock poisoned".to_owned()))?;

        if let Some(value) = values.get(&(name.to_owned(), scope)) {
            return Ok(Some(value.clone()));
        }
        // Shop-scoped lookups fall back to the global value.
        if let ConfigScope::Shop(_) = scope {
            return Ok(values.get(&(name.to_owned(), ConfigScope::Global)).cloned());
        }
        Ok(None)
    }

    async fn set(
        &self,
        name: &str,
        value: &str,
        scope: ConfigScope,
    ) -> Result<(), ConfigStoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| ConfigStoreError::Backend("config store lock poisoned".to_owned()))?;
        values.insert((name.to_owned(), scope), value.to_owned());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), ConfigStoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| ConfigStoreError::Backend("config store lock poisoned".to_owned()))?;
        values.retain(|(stored_name, _), _| stored_name != name);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_unset_is_none() {
        let store = MemoryConfigStore::new();
        let value = store.get("MISSING", ConfigScope::Global).await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let store = MemoryConfigStore::new();
        store.set("KEY", "42", ConfigScope::Global).await.unwrap();
        let value = store.get("KEY", ConfigScope::Global).await.unwrap();
        assert_eq!(value.as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryConfigStore::new();
        store.set("KEY", "1", ConfigScope::Global).await.unwrap();
        store.set("KEY", "2", ConfigScope::Global).await.unwrap();
        let value = store.get("KEY", ConfigScope::Global).await.unwrap();
        assert_eq!(value.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_shop_scope_falls_back_to_global() {
        let store = MemoryConfigStore::new();
        store.set("KEY", "global", ConfigScope::Global).await.unwrap();

        let shop = ConfigScope::Shop(ShopId::new(1));
        let value = store.get("KEY", shop).await.unwrap();
        assert_eq!(value.as_deref(), Some("global"));
    }

    #[tokio::test]
    async fn test_shop_scope_overrides_global() {
        let store = MemoryConfigStore::new();
        store.set("KEY", "global", ConfigScope::Global).await.unwrap();

        let shop = ConfigScope::Shop(ShopId::new(1));
        store.set("KEY", "shop", shop).await.unwrap();

        assert_eq!(store.get("KEY", shop).await.unwrap().as_deref(), Some("shop"));
        assert_eq!(
            store.get("KEY", ConfigScope::Global).await.unwrap().as_deref(),
            Some("global")
        );
        // Another shop still sees the global value.
        let other = ConfigScope::Shop(ShopId::new(2));
        assert_eq!(store.get("KEY", other).await.unwrap().as_deref(), Some("global"));
    }

    #[tokio::test]
    async fn test_delete_removes_every_scope() {
        let store = MemoryConfigStore::new();
        let shop = ConfigScope::Shop(ShopId::new(1));
        store.set("KEY", "global", ConfigScope::Global).await.unwrap();
        store.set("KEY", "shop", shop).await.unwrap();
        store.set("OTHER", "kept", ConfigScope::Global).await.unwrap();

        store.delete("KEY").await.unwrap();

        assert_eq!(store.get("KEY", ConfigScope::Global).await.unwrap(), None);
        assert_eq!(store.get("KEY", shop).await.unwrap(), None);
        assert_eq!(
            store.get("OTHER", ConfigScope::Global).await.unwrap().as_deref(),
            Some("kept")
        );
    }
}
