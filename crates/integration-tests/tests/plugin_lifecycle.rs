//! Plugin lifecycle tests.
//!
//! Drives the full install / configure / browse / uninstall scenario against
//! the in-memory configuration store, the same way the CLI and the
//! storefront drive it against `PostgreSQL`.

use std::sync::Arc;

use coastline_core::plugin::{DefaultCurrencyPlugin, DefaultCurrencySettings};
use coastline_core::{
    ConfigScope, ConfigStore, CurrencyId, LanguageId, MemoryConfigStore, PluginHost,
    RequestContext, ShopId,
};

const SHOP: ShopId = ShopId::new(1);

fn fixture() -> (PluginHost, DefaultCurrencySettings) {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
    let settings = DefaultCurrencySettings::new(store.clone());

    let mut host = PluginHost::new();
    host.register(Box::new(DefaultCurrencyPlugin::new(store)));
    (host, settings)
}

fn anonymous_request() -> RequestContext {
    RequestContext::new(SHOP, LanguageId::new(1), None)
}

#[tokio::test]
async fn test_install_configure_browse_uninstall() {
    let (host, settings) = fixture();

    // Install initializes the setting as unset.
    host.install_all().await.expect("install");
    assert_eq!(
        settings.get(ConfigScope::Shop(SHOP)).await.expect("get"),
        None
    );

    // A request before any default is configured changes nothing.
    let mut ctx = anonymous_request();
    host.run_request_start(&mut ctx).await;
    assert_eq!(ctx.currency(), None);

    // The back office selects currency 42.
    settings
        .set(ConfigScope::Shop(SHOP), CurrencyId::new(42))
        .await
        .expect("set");

    // A new anonymous session picks up the default.
    let mut ctx = anonymous_request();
    host.run_request_start(&mut ctx).await;
    assert_eq!(ctx.currency(), Some(CurrencyId::new(42)));

    // Uninstall removes the setting entirely.
    host.uninstall_all().await.expect("uninstall");
    assert_eq!(
        settings.get(ConfigScope::Shop(SHOP)).await.expect("get"),
        None
    );

    // Later requests are no-ops again.
    let mut ctx = anonymous_request();
    host.run_request_start(&mut ctx).await;
    assert_eq!(ctx.currency(), None);
}

#[tokio::test]
async fn test_dispatch_is_idempotent() {
    let (host, settings) = fixture();
    settings
        .set(ConfigScope::Shop(SHOP), CurrencyId::new(7))
        .await
        .expect("set");

    let mut ctx = anonymous_request();
    host.run_request_start(&mut ctx).await;
    let after_first = ctx.clone();

    host.run_request_start(&mut ctx).await;
    assert_eq!(ctx, after_first);
}

#[tokio::test]
async fn test_existing_selection_survives_default_change() {
    let (host, settings) = fixture();
    settings
        .set(ConfigScope::Shop(SHOP), CurrencyId::new(1))
        .await
        .expect("set");

    // Visitor session picks up currency 1.
    let mut ctx = anonymous_request();
    host.run_request_start(&mut ctx).await;
    assert_eq!(ctx.currency(), Some(CurrencyId::new(1)));

    // Back office changes the default; the existing session keeps its
    // selection on later requests.
    settings
        .set(ConfigScope::Shop(SHOP), CurrencyId::new(2))
        .await
        .expect("set");
    host.run_request_start(&mut ctx).await;
    assert_eq!(ctx.currency(), Some(CurrencyId::new(1)));
}

#[tokio::test]
async fn test_reinstall_starts_unset() {
    let (host, settings) = fixture();

    host.install_all().await.expect("install");
    settings
        .set(ConfigScope::Shop(SHOP), CurrencyId::new(42))
        .await
        .expect("set");
    host.uninstall_all().await.expect("uninstall");
    host.install_all().await.expect("reinstall");

    assert_eq!(
        settings.get(ConfigScope::Shop(SHOP)).await.expect("get"),
        None
    );
}
