//! Plugin capability interface and host registry.
//!
//! Platform extensions implement [`Plugin`] on a plain struct and are
//! registered with a [`PluginHost`] at startup. There is no base-class
//! lifecycle: a plugin exposes exactly the capabilities it needs
//! (`on_install`, `on_uninstall`, `on_request_start`) and the host invokes
//! them at the matching points.
//!
//! The per-request state a plugin may read or mutate is carried in
//! [`RequestContext`], passed explicitly to `on_request_start`. Plugins never
//! reach into ambient globals.

pub mod default_currency;

use async_trait::async_trait;
use thiserror::Error;

pub use default_currency::{DefaultCurrencyPlugin, DefaultCurrencySettings};

use crate::config_store::ConfigStoreError;
use crate::types::{CurrencyId, LanguageId, ShopId};

/// Errors surfaced by plugin capabilities.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Configuration store failure.
    #[error(transparent)]
    ConfigStore(#[from] ConfigStoreError),
}

/// Per-request state handed to [`Plugin::on_request_start`].
///
/// Built by the host from the inbound request (shop context, language,
/// visitor session) and written back to the session afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    shop: ShopId,
    language: LanguageId,
    currency: Option<CurrencyId>,
}

impl RequestContext {
    /// Build a context for a request served by `shop` in `language`, with the
    /// session's current currency selection (`None` when the visitor has not
    /// selected one yet).
    #[must_use]
    pub const fn new(shop: ShopId, language: LanguageId, currency: Option<CurrencyId>) -> Self {
        Self {
            shop,
            language,
            currency,
        }
    }

    /// The shop serving this request.
    #[must_use]
    pub const fn shop(&self) -> ShopId {
        self.shop
    }

    /// The language the request is served in.
    #[must_use]
    pub const fn language(&self) -> LanguageId {
        self.language
    }

    /// The session's currency selection, if any.
    #[must_use]
    pub const fn currency(&self) -> Option<CurrencyId> {
        self.currency
    }

    /// Set the session's currency selection.
    pub const fn set_currency(&mut self, currency: CurrencyId) {
        self.currency = Some(currency);
    }
}

/// A platform extension.
///
/// All capabilities default to no-ops; implement only what the plugin needs.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Stable identifier used in logs and the CLI.
    fn name(&self) -> &'static str;

    /// Invoked once when the plugin is installed.
    async fn on_install(&self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Invoked once when the plugin is uninstalled.
    async fn on_uninstall(&self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Invoked on every front-office request, before any business handler.
    async fn on_request_start(&self, _ctx: &mut RequestContext) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Registry of installed plugins.
///
/// The host builds one at startup, registers every plugin, and dispatches
/// lifecycle and request events to all of them in registration order.
#[derive(Default)]
pub struct PluginHost {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. Dispatch follows registration order.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every plugin's install capability.
    ///
    /// # Errors
    ///
    /// Stops at the first failing plugin and returns its error.
    pub async fn install_all(&self) -> Result<(), PluginError> {
        for plugin in &self.plugins {
            plugin.on_install().await?;
            tracing::info!(plugin = plugin.name(), "plugin installed");
        }
        Ok(())
    }

    /// Run every plugin's uninstall capability.
    ///
    /// # Errors
    ///
    /// Stops at the first failing plugin and returns its error.
    pub async fn uninstall_all(&self) -> Result<(), PluginError> {
        for plugin in &self.plugins {
            plugin.on_uninstall().await?;
            tracing::info!(plugin = plugin.name(), "plugin uninstalled");
        }
        Ok(())
    }

    /// Dispatch request-start to every plugin.
    ///
    /// A failing plugin is logged and skipped; request processing must not
    /// depend on any plugin succeeding.
    pub async fn run_request_start(&self, ctx: &mut RequestContext) {
        for plugin in &self.plugins {
            if let Err(e) = plugin.on_request_start(ctx).await {
                tracing::warn!(plugin = plugin.name(), error = %e, "request-start hook failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counter {
        installs: AtomicUsize,
        requests: AtomicUsize,
    }

    impl Counter {
        const fn new() -> Self {
            Self {
                installs: AtomicUsize::new(0),
                requests: AtomicUsize::new(0),
            }
        }
    }

    struct CountingPlugin(std::sync::Arc<Counter>);

    #[async_trait]
    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn on_install(&self) -> Result<(), PluginError> {
            self.0.installs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn on_request_start(&self, _ctx: &mut RequestContext) -> Result<(), PluginError> {
            self.0.requests.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingPlugin;

    #[async_trait]
    impl Plugin for FailingPlugin {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn on_request_start(&self, _ctx: &mut RequestContext) -> Result<(), PluginError> {
            Err(ConfigStoreError::Backend("boom".to_owned()).into())
        }
    }

    fn context() -> RequestContext {
        RequestContext::new(ShopId::new(1), LanguageId::new(1), None)
    }

    #[tokio::test]
    async fn test_install_all_reaches_every_plugin() {
        let counter = std::sync::Arc::new(Counter::new());
        let mut host = PluginHost::new();
        host.register(Box::new(CountingPlugin(counter.clone())));
        host.register(Box::new(CountingPlugin(counter.clone())));

        host.install_all().await.unwrap();
        assert_eq!(counter.installs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_request_start_continues_past_failure() {
        let counter = std::sync::Arc::new(Counter::new());
        let mut host = PluginHost::new();
        host.register(Box::new(FailingPlugin));
        host.register(Box::new(CountingPlugin(counter.clone())));

        let mut ctx = context();
        host.run_request_start(&mut ctx).await;
        assert_eq!(counter.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_capabilities_are_noops() {
        struct Bare;

        #[async_trait]
        impl Plugin for Bare {
            fn name(&self) -> &'static str {
                "bare"
            }
        }

        let mut host = PluginHost::new();
        host.register(Box::new(Bare));
        host.install_all().await.unwrap();
        host.uninstall_all().await.unwrap();

        let mut ctx = context();
        host.run_request_start(&mut ctx).await;
        assert_eq!(ctx, context());
    }

    #[test]
    fn test_context_accessors() {
        let mut ctx = context();
        assert_eq!(ctx.shop(), ShopId::new(1));
        assert_eq!(ctx.language(), LanguageId::new(1));
        assert_eq!(ctx.currency(), None);

        ctx.set_currency(CurrencyId::new(3));
        assert_eq!(ctx.currency(), Some(CurrencyId::new(3)));
    }
}
