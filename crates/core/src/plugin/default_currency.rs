//! Front-office default currency plugin.
//!
//! Lets the back office choose a default currency and applies it to visitor
//! sessions that have not selected one yet. Two pieces:
//!
//! - [`DefaultCurrencySettings`] persists the selection as a single named
//!   configuration value.
//! - [`DefaultCurrencyPlugin`] wires the setting into the platform lifecycle:
//!   install creates the (empty) value, uninstall deletes it, and
//!   request-start copies it into sessions with no selection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config_store::{ConfigScope, ConfigStore, ConfigStoreError};
use crate::types::CurrencyId;

use super::{Plugin, PluginError, RequestContext};

/// Configuration name the selected currency is stored under.
pub const SELECTED_CURRENCY: &str = "FRONTOFFICEDEFAULTCURRENCY_SELECTED_CURRENCY";

/// Persistence adapter for the selected default currency.
///
/// Wraps the host configuration store and owns the (de)serialization of the
/// one value this plugin keeps. An empty or malformed stored value reads as
/// "no default configured"; callers are responsible for only writing IDs that
/// exist in the shop's currency catalog.
#[derive(Clone)]
pub struct DefaultCurrencySettings {
    store: Arc<dyn ConfigStore>,
}

impl DefaultCurrencySettings {
    /// Create an adapter over the host configuration store.
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// The configured default currency for `scope`, or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the backend fails.
    pub async fn get(&self, scope: ConfigScope) -> Result<Option<CurrencyId>, ConfigStoreError> {
        let value = self.store.get(SELECTED_CURRENCY, scope).await?;
        Ok(value.as_deref().and_then(CurrencyId::parse_config_value))
    }

    /// Persist `currency` as the default for `scope`, overwriting any
    /// previous selection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the backend fails.
    pub async fn set(
        &self,
        scope: ConfigScope,
        currency: CurrencyId,
    ) -> Result<(), ConfigStoreError> {
        self.store
            .set(SELECTED_CURRENCY, &currency.to_string(), scope)
            .await
    }

    /// Initialize the value as unset (install path).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the backend fails.
    pub async fn init(&self) -> Result<(), ConfigStoreError> {
        self.store.set(SELECTED_CURRENCY, "", ConfigScope::Global).await
    }

    /// Remove the value entirely (uninstall path).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError`] when the backend fails.
    pub async fn clear(&self) -> Result<(), ConfigStoreError> {
        self.store.delete(SELECTED_CURRENCY).await
    }
}

/// The default-currency plugin.
pub struct DefaultCurrencyPlugin {
    settings: DefaultCurrencySettings,
}

impl DefaultCurrencyPlugin {
    /// Plugin identifier.
    pub const NAME: &'static str = "front-office-default-currency";

    /// Create the plugin over the host configuration store.
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            settings: DefaultCurrencySettings::new(store),
        }
    }

    /// The settings adapter this plugin reads from.
    #[must_use]
    pub const fn settings(&self) -> &DefaultCurrencySettings {
        &self.settings
    }
}

#[async_trait]
impl Plugin for DefaultCurrencyPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn on_install(&self) -> Result<(), PluginError> {
        self.settings.init().await?;
        Ok(())
    }

    async fn on_uninstall(&self) -> Result<(), PluginError> {
        self.settings.clear().await?;
        Ok(())
    }

    /// Apply the configured default to sessions with no currency selection.
    ///
    /// Idempotent: once the session carries a selection, later invocations
    /// leave it untouched.
    async fn on_request_start(&self, ctx: &mut RequestContext) -> Result<(), PluginError> {
        if ctx.currency().is_some() {
            return Ok(());
        }
        if let Some(default) = self.settings.get(ConfigScope::Shop(ctx.shop())).await? {
            tracing::debug!(currency = %default, "applying default currency to session");
            ctx.set_currency(default);
        }
        Ok(())
    }
}
