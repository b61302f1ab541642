//! Currency catalog entity.

use serde::{Deserialize, Serialize};

use super::CurrencyId;

/// A currency as listed in the shop catalog.
///
/// Catalog entries are read-only from the plugin's point of view; the host
/// owns creation and activation of currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Catalog ID.
    pub id: CurrencyId,
    /// Display name shown in the back office (e.g., "Euro").
    pub name: String,
    /// ISO 4217 alphabetic code (e.g., "EUR").
    pub iso_code: String,
}

impl Currency {
    /// Create a catalog entry.
    #[must_use]
    pub fn new(id: CurrencyId, name: impl Into<String>, iso_code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            iso_code: iso_code.into(),
        }
    }
}
