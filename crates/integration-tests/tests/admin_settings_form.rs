//! Back-office settings form tests.
//!
//! Exercises the module configuration page over HTTP: rendering the currency
//! dropdown, persisting a valid selection, rejecting invalid submissions,
//! and the end-to-end hand-off to the front office.

use axum::http::StatusCode;

use coastline_core::plugin::DefaultCurrencySettings;
use coastline_core::{ConfigScope, CurrencyId};

use coastline_integration_tests::support::{
    SHOP, USD, body_string, get, post_form, session_cookie, test_app,
};

const FORM_URI: &str = "/admin/modules/default-currency";
const FIELD: &str = "FRONTOFFICEDEFAULTCURRENCY_SELECTED_CURRENCY";

#[tokio::test]
async fn test_form_renders_currency_dropdown() {
    let (app, _store) = test_app();

    let response = get(&app, FORM_URI, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(&format!(r#"name="{FIELD}""#)));
    assert!(body.contains("Euro (EUR)"));
    assert!(body.contains("US Dollar (USD)"));
    // Nothing configured yet, so no option is pre-selected.
    assert!(!body.contains(" selected>"));
}

#[tokio::test]
async fn test_save_persists_and_confirms() {
    let (app, store) = test_app();

    let response = post_form(&app, FORM_URI, &format!("{FIELD}=2")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Successfully updated the default currency"));

    let settings = DefaultCurrencySettings::new(store);
    assert_eq!(
        settings.get(ConfigScope::Shop(SHOP)).await.expect("get"),
        Some(USD)
    );

    // The re-rendered form pre-selects the stored currency.
    let response = get(&app, FORM_URI, None).await;
    let body = body_string(response).await;
    assert!(body.contains(r#"<option value="2" selected>"#));
}

#[tokio::test]
async fn test_unknown_currency_is_rejected() {
    let (app, store) = test_app();

    let response = post_form(&app, FORM_URI, &format!("{FIELD}=99")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("The selected currency is not available in this shop."));

    let settings = DefaultCurrencySettings::new(store);
    assert_eq!(settings.get(ConfigScope::Shop(SHOP)).await.expect("get"), None);
}

#[tokio::test]
async fn test_empty_submission_is_rejected() {
    let (app, store) = test_app();

    let response = post_form(&app, FORM_URI, &format!("{FIELD}=")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Please select a currency."));

    let settings = DefaultCurrencySettings::new(store);
    assert_eq!(settings.get(ConfigScope::Shop(SHOP)).await.expect("get"), None);
}

#[tokio::test]
async fn test_save_overwrites_previous_selection() {
    let (app, store) = test_app();

    post_form(&app, FORM_URI, &format!("{FIELD}=1")).await;
    post_form(&app, FORM_URI, &format!("{FIELD}=2")).await;

    let settings = DefaultCurrencySettings::new(store);
    assert_eq!(
        settings.get(ConfigScope::Shop(SHOP)).await.expect("get"),
        Some(CurrencyId::new(2))
    );
}

#[tokio::test]
async fn test_saved_default_reaches_the_front_office() {
    let (app, _store) = test_app();

    let response = post_form(&app, FORM_URI, &format!("{FIELD}=2")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // A fresh anonymous visit picks up the configured default.
    let response = get(&app, "/", None).await;
    assert!(session_cookie(&response).is_some());
    let body = body_string(response).await;
    assert!(body.contains(r#"<span id="active-currency">USD</span>"#));
}
