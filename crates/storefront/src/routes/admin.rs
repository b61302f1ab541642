//! Back-office settings form for the default-currency plugin.
//!
//! Mirrors the classic module configuration page flow: GET renders the form,
//! POST persists the submitted value and re-renders the form with a
//! confirmation message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::instrument;

use coastline_core::ConfigScope;
use coastline_core::CurrencyId;
use coastline_core::plugin::default_currency::SELECTED_CURRENCY;

use crate::error::Result;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Settings form data.
///
/// The field is named after the configuration entry it updates, as the host
/// form conventions require.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(rename = "FRONTOFFICEDEFAULTCURRENCY_SELECTED_CURRENCY", default)]
    pub selected_currency: String,
}

// =============================================================================
// Templates
// =============================================================================

/// A dropdown entry in the settings form.
pub struct CurrencyOption {
    pub id: i32,
    pub label: String,
    pub selected: bool,
}

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/settings.html")]
pub struct SettingsTemplate {
    /// HTML field name (the configuration entry name).
    pub field_name: &'static str,
    /// Dropdown entries for the current shop's currencies.
    pub options: Vec<CurrencyOption>,
    /// Success message shown after a save.
    pub confirmation: Option<String>,
    /// Validation message shown after a rejected save.
    pub error: Option<String>,
}

/// Render the settings form with the current stored selection.
async fn render_form(
    state: &AppState,
    confirmation: Option<String>,
    error: Option<String>,
) -> Result<SettingsTemplate> {
    let shop = state.config().shop_id;
    let currencies = state.catalog().currencies_for_shop(shop).await?;
    let selected = state.default_currency().get(ConfigScope::Shop(shop)).await?;

    let options = currencies
        .into_iter()
        .map(|c| CurrencyOption {
            id: c.id.as_i32(),
            label: format!("{} ({})", c.name, c.iso_code),
            selected: Some(c.id) == selected,
        })
        .collect();

    Ok(SettingsTemplate {
        field_name: SELECTED_CURRENCY,
        options,
        confirmation,
        error,
    })
}

// =============================================================================
// Routes
// =============================================================================

/// Display the settings form.
///
/// GET /admin/modules/default-currency
#[instrument(skip(state))]
pub async fn settings_page(State(state): State<AppState>) -> Result<SettingsTemplate> {
    render_form(&state, None, None).await
}

/// Save the settings form.
///
/// POST /admin/modules/default-currency
///
/// The submitted ID must belong to a currency available in the current shop;
/// anything else re-renders the form with a validation message and leaves the
/// stored value untouched.
#[instrument(skip(state, form))]
pub async fn save_settings(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<SettingsTemplate> {
    let shop = state.config().shop_id;

    let Some(currency) = CurrencyId::parse_config_value(&form.selected_currency) else {
        return render_form(&state, None, Some("Please select a currency.".to_string())).await;
    };

    if !state.catalog().contains(shop, currency).await? {
        return render_form(
            &state,
            None,
            Some("The selected currency is not available in this shop.".to_string()),
        )
        .await;
    }

    state
        .default_currency()
        .set(ConfigScope::Shop(shop), currency)
        .await?;
    tracing::info!(%currency, %shop, "default currency updated");

    render_form(
        &state,
        Some("Successfully updated the default currency".to_string()),
        None,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_field_matches_configuration_name() {
        // The serde rename above must stay in sync with the stored name.
        assert_eq!(SELECTED_CURRENCY, "FRONTOFFICEDEFAULTCURRENCY_SELECTED_CURRENCY");
    }

    #[test]
    fn test_form_deserializes_from_urlencoded() {
        let form: SettingsForm =
            serde_urlencoded::from_str("FRONTOFFICEDEFAULTCURRENCY_SELECTED_CURRENCY=42")
                .expect("form should deserialize");
        assert_eq!(form.selected_currency, "42");
    }

    #[test]
    fn test_form_missing_field_defaults_empty() {
        let form: SettingsForm = serde_urlencoded::from_str("").expect("form should deserialize");
        assert_eq!(form.selected_currency, "");
    }
}
