//! Plugin lifecycle commands.
//!
//! Builds the same plugin registry the storefront binary uses and drives its
//! install/uninstall capabilities against the configured database.
//!
//! ```bash
//! coast-cli plugin install
//! coast-cli plugin uninstall
//! ```

use std::sync::Arc;

use coastline_core::plugin::DefaultCurrencyPlugin;
use coastline_core::{ConfigStore, PluginHost};
use coastline_storefront::db::PgConfigStore;

use super::{CommandError, connect};

/// Build the platform plugin registry over the database-backed config store.
async fn build_host() -> Result<PluginHost, CommandError> {
    let pool = connect().await?;
    let config_store: Arc<dyn ConfigStore> = Arc::new(PgConfigStore::new(pool));

    let mut host = PluginHost::new();
    host.register(Box::new(DefaultCurrencyPlugin::new(config_store)));
    Ok(host)
}

/// Run every registered plugin's install capability.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a plugin's install
/// capability fails.
pub async fn install() -> Result<(), CommandError> {
    let host = build_host().await?;
    host.install_all().await?;
    tracing::info!(plugins = host.len(), "Install complete");
    Ok(())
}

/// Run every registered plugin's uninstall capability.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a plugin's uninstall
/// capability fails.
pub async fn uninstall() -> Result<(), CommandError> {
    let host = build_host().await?;
    host.uninstall_all().await?;
    tracing::info!(plugins = host.len(), "Uninstall complete");
    Ok(())
}
