//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use coastline_core::CurrencyId;

use crate::error::Result;
use crate::models::session::keys;
use crate::state::AppState;

/// Currency display data for templates.
pub struct CurrencyView {
    pub name: String,
    pub iso_code: String,
    pub active: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Currencies available to this shop.
    pub currencies: Vec<CurrencyView>,
    /// ISO code of the session's active currency, if any.
    pub active_currency: Option<String>,
}

/// Display the home page.
///
/// By the time this handler runs, the plugin dispatch has already applied a
/// configured default currency to sessions that had none.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let selected: Option<CurrencyId> = session
        .get(keys::CURRENCY_ID)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read session currency");
            None
        });

    let currencies = state
        .catalog()
        .currencies_for_shop(state.config().shop_id)
        .await?;

    let active_currency = currencies
        .iter()
        .find(|c| Some(c.id) == selected)
        .map(|c| c.iso_code.clone());

    let currencies = currencies
        .into_iter()
        .map(|c| CurrencyView {
            active: Some(c.id) == selected,
            name: c.name,
            iso_code: c.iso_code,
        })
        .collect();

    Ok(HomeTemplate {
        currencies,
        active_currency,
    })
}
