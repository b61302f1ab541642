//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use coastline_core::plugin::{DefaultCurrencyPlugin, DefaultCurrencySettings};
use coastline_core::{ConfigStore, CurrencyCatalog, PluginHost};

use crate::config::StorefrontConfig;
use crate::db::{PgConfigStore, PgCurrencyCatalog};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: database pool, configuration, the host collaborators
/// (config store, currency catalog), and the plugin registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    config_store: Arc<dyn ConfigStore>,
    catalog: Arc<dyn CurrencyCatalog>,
    default_currency: DefaultCurrencySettings,
    plugins: PluginHost,
}

impl AppState {
    /// Create the application state with `PostgreSQL`-backed collaborators.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let config_store: Arc<dyn ConfigStore> = Arc::new(PgConfigStore::new(pool.clone()));
        let catalog: Arc<dyn CurrencyCatalog> = Arc::new(PgCurrencyCatalog::new(pool.clone()));
        Self::with_collaborators(config, pool, config_store, catalog)
    }

    /// Create the application state over explicit collaborators.
    ///
    /// Tests use this with the in-memory implementations from
    /// `coastline-core` to exercise the full HTTP surface without a database.
    #[must_use]
    pub fn with_collaborators(
        config: StorefrontConfig,
        pool: PgPool,
        config_store: Arc<dyn ConfigStore>,
        catalog: Arc<dyn CurrencyCatalog>,
    ) -> Self {
        let default_currency = DefaultCurrencySettings::new(config_store.clone());

        // Plugin registration point. Every platform extension is registered
        // here, in dispatch order.
        let mut plugins = PluginHost::new();
        plugins.register(Box::new(DefaultCurrencyPlugin::new(config_store.clone())));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                config_store,
                catalog,
                default_currency,
                plugins,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the host configuration store.
    #[must_use]
    pub fn config_store(&self) -> &Arc<dyn ConfigStore> {
        &self.inner.config_store
    }

    /// Get a reference to the currency catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn CurrencyCatalog> {
        &self.inner.catalog
    }

    /// Get a reference to the default-currency settings adapter.
    #[must_use]
    pub fn default_currency(&self) -> &DefaultCurrencySettings {
        &self.inner.default_currency
    }

    /// Get a reference to the plugin registry.
    #[must_use]
    pub fn plugins(&self) -> &PluginHost {
        &self.inner.plugins
    }
}
