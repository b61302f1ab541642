//! Session-related types.
//!
//! The visitor session carries at most one piece of plugin-visible state:
//! the active currency selection.

/// Session keys for visitor state.
pub mod keys {
    /// Key for the session's active currency selection (`CurrencyId`).
    pub const CURRENCY_ID: &str = "currency_id";
}
