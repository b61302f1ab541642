//! Plugin request-start dispatch.
//!
//! Runs before any front-office handler. Builds a [`RequestContext`] from the
//! deployment's shop/language context and the visitor session, hands it to
//! every registered plugin, and persists any currency selection a plugin made
//! back into the session.
//!
//! Session read failures are treated as "no selection yet"; request
//! processing never depends on a plugin succeeding.

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use tower_sessions::Session;

use coastline_core::{CurrencyId, RequestContext};

use crate::models::session::keys;
use crate::state::AppState;

/// Middleware dispatching the request-start capability of every plugin.
pub async fn plugin_request_start(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let selected = session
        .get::<CurrencyId>(keys::CURRENCY_ID)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read session currency");
            None
        });

    let mut ctx = RequestContext::new(
        state.config().shop_id,
        state.config().language_id,
        selected,
    );
    state.plugins().run_request_start(&mut ctx).await;

    // Persist a selection made during dispatch. Plugins only ever fill an
    // empty selection, so an unchanged context writes nothing.
    if ctx.currency() != selected
        && let Some(currency) = ctx.currency()
        && let Err(e) = session.insert(keys::CURRENCY_ID, currency).await
    {
        tracing::warn!(error = %e, "failed to persist session currency");
    }

    next.run(request).await
}
