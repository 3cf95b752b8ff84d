//! Purchase modals: confirmation, sign-in prompt and the completion redirect.

mod support;

use std::time::Duration;

use cheerpaw_core::dom::{ElementBuilder, ElementId};
use cheerpaw_core::markup::{self, COIN_PLANS};
use cheerpaw_core::{CheerApi, ClickOutcome, InteractionConfig, Interactions, ModalState, Page};
use support::{page, text, Reply, ScriptedApi};
use url::Url;

const CHARGE_URL: &str = "http://localhost:8000/money/charge/";

fn charge_page(url: &str, authenticated: bool) -> (Interactions, ElementId) {
    let mut page = page(url).with_authenticated(authenticated);
    markup::render_for(&mut page, &[], None);
    let body = page.document().body();
    let offer = page.document_mut().build(
        body,
        ElementBuilder::new("button")
            .class("purchase-btn")
            .data("url", "/buy/300/")
            .data("coins", "300")
            .data("price", "150"),
    );
    (Interactions::boot(page, InteractionConfig::default()), offer)
}

fn by_id(app: &Interactions, id: &str) -> ElementId {
    app.page().document().get_element_by_id(id).unwrap()
}

fn shown(app: &Interactions, id: &str) -> bool {
    !app.page().document().is_hidden(by_id(app, id))
}

#[test]
fn test_offer_opens_confirmation() {
    let (mut app, offer) = charge_page(CHARGE_URL, true);

    assert_eq!(app.click(offer), ClickOutcome::Handled);
    assert!(shown(&app, "confirmModal"));
    assert!(!shown(&app, "authModal"));
    assert_eq!(text(&app, by_id(&app, "confirmCoinsText")), "300");
    assert_eq!(text(&app, by_id(&app, "confirmPriceText")), "150");

    let modal = app.purchase().confirm_modal().unwrap();
    assert_eq!(modal.state(), ModalState::Shown);
    assert_eq!(modal.pending().unwrap().url, "/buy/300/");
}

#[test]
fn test_large_plan_is_grouped() {
    let (mut app, _) = charge_page(CHARGE_URL, true);
    let doc = app.page().document();
    let plan = doc.query_class_all(doc.body(), "purchase-btn")[3];
    app.click(plan);
    assert_eq!(text(&app, by_id(&app, "confirmCoinsText")), "7,000");
    assert_eq!(text(&app, by_id(&app, "confirmPriceText")), "5,000");
}

#[test]
fn test_confirm_submits_once() {
    let (mut app, offer) = charge_page(CHARGE_URL, true);
    let ok = by_id(&app, "okConfirmBtn");
    app.click(offer);

    assert_eq!(app.click(ok), ClickOutcome::Handled);
    assert!(app.page().document().is_disabled(ok));
    let form = by_id(&app, "hiddenBuyForm");
    assert_eq!(app.page().document().attribute(form, "action"), Some("/buy/300/"));
    assert_eq!(app.page().submissions().len(), 1);
    assert_eq!(app.page().submissions()[0].method, "POST");

    // A second click on the disabled control never arrives.
    assert_eq!(app.click(ok), ClickOutcome::Unhandled);
    assert_eq!(app.page().submissions().len(), 1);
    assert!(app.purchase().confirm_modal().unwrap().pending().is_none());
}

#[test]
fn test_cooldown_reenables_without_resubmitting() {
    let (mut app, offer) = charge_page(CHARGE_URL, true);
    let ok = by_id(&app, "okConfirmBtn");
    app.click(offer);
    app.click(ok);

    app.advance_by(Duration::from_millis(2999));
    assert!(app.page().document().is_disabled(ok));
    app.advance_by(Duration::from_millis(1));
    assert!(!app.page().document().is_disabled(ok));

    app.click(ok);
    assert_eq!(app.page().submissions().len(), 1);
}

#[test]
fn test_reopen_enables_confirm() {
    let (mut app, offer) = charge_page(CHARGE_URL, true);
    let ok = by_id(&app, "okConfirmBtn");
    app.click(offer);
    app.click(ok);
    app.click(offer);

    assert!(!app.page().document().is_disabled(ok));
    app.click(ok);
    assert_eq!(app.page().submissions().len(), 2);
}

#[test]
fn test_cancel_and_background_close() {
    let (mut app, offer) = charge_page(CHARGE_URL, true);
    let modal = by_id(&app, "confirmModal");

    app.click(offer);
    app.click(by_id(&app, "cancelConfirmBtn"));
    assert!(!shown(&app, "confirmModal"));
    assert!(app.purchase().confirm_modal().unwrap().pending().is_none());

    app.click(offer);
    let content = app.page().document().children(modal)[0];
    app.click(content);
    assert!(shown(&app, "confirmModal"), "clicks inside the dialog keep it open");

    app.click(modal);
    assert!(!shown(&app, "confirmModal"));

    app.click(by_id(&app, "okConfirmBtn"));
    assert!(app.page().submissions().is_empty());
}

#[test]
fn test_signed_out_viewer_gets_auth_prompt() {
    let (mut app, offer) = charge_page(CHARGE_URL, false);

    app.click(offer);
    assert!(shown(&app, "authModal"));
    assert!(!shown(&app, "confirmModal"));
    assert_eq!(text(&app, by_id(&app, "authPriceText")), "150");
    assert!(app.purchase().confirm_modal().unwrap().pending().is_none());

    app.click(by_id(&app, "authCancelBtn"));
    assert!(!shown(&app, "authModal"));

    app.click(offer);
    app.click(by_id(&app, "authModal"));
    assert!(!shown(&app, "authModal"));
}

#[test]
fn test_completion_query_is_consumed_once() {
    let url = format!("{}?done=1&coins=250&price=250", CHARGE_URL);
    let (mut app, _) = charge_page(&url, true);

    assert!(shown(&app, "doneModal"));
    assert_eq!(text(&app, by_id(&app, "doneCoinsText")), "250");
    assert_eq!(text(&app, by_id(&app, "donePriceText")), "250");
    assert_eq!(
        text(&app, by_id(&app, "donePointText")),
        "Earned 2 stanning points!"
    );
    assert_eq!(app.page().location().as_str(), CHARGE_URL);
    assert_eq!(app.page().replaced_locations().len(), 1);

    app.click(by_id(&app, "doneOkBtn"));
    assert!(!shown(&app, "doneModal"));

    // Reload: the stripped URL brings nothing back.
    let mut reloaded = app.page().navigate(app.page().location().clone());
    markup::render_for(&mut reloaded, &[], None);
    let reloaded = Interactions::boot(reloaded, InteractionConfig::default());
    assert!(!shown(&reloaded, "doneModal"));
    assert!(reloaded.purchase().receipt().is_none());
}

#[test]
fn test_completion_without_marker_is_ignored() {
    let url = format!("{}?done=0&coins=250", CHARGE_URL);
    let (app, _) = charge_page(&url, true);
    assert!(!shown(&app, "doneModal"));
    assert!(app.page().replaced_locations().is_empty());
    assert_eq!(app.page().location().query(), Some("done=0&coins=250"));
}

#[test]
fn test_completion_with_bad_numbers_shows_zero() {
    let url = format!("{}?done=1&coins=lots", CHARGE_URL);
    let (app, _) = charge_page(&url, true);
    assert!(shown(&app, "doneModal"));
    assert_eq!(text(&app, by_id(&app, "doneCoinsText")), "0");
    assert_eq!(text(&app, by_id(&app, "donePriceText")), "0");
    assert_eq!(
        text(&app, by_id(&app, "donePointText")),
        "Earned 0 stanning points!"
    );
}

#[tokio::test]
async fn test_purchase_round_trip_through_server() {
    let (mut app, _) = charge_page(CHARGE_URL, true);
    let plan_button = {
        let doc = app.page().document();
        doc.query_class_all(doc.body(), "purchase-btn")[2]
    };
    app.click(plan_button);
    app.click(by_id(&app, "okConfirmBtn"));

    let submission = app.page_mut().take_submission().unwrap();
    assert_eq!(submission.action, COIN_PLANS[2].buy_url());

    let api = ScriptedApi::new(Vec::<Reply>::new());
    let landing = api.submit_form(&submission).await.unwrap();
    assert_eq!(landing.path(), "/money/charge/");

    let mut next: Page = app.page().navigate(landing);
    markup::render_for(&mut next, &[], None);
    let next = Interactions::boot(next, InteractionConfig::default());

    assert!(shown(&next, "doneModal"));
    assert_eq!(text(&next, by_id(&next, "doneCoinsText")), "3,600");
    assert_eq!(text(&next, by_id(&next, "donePriceText")), "3,000");
    assert_eq!(
        text(&next, by_id(&next, "donePointText")),
        "Earned 36 stanning points!"
    );
    assert_eq!(next.page().location(), &Url::parse(CHARGE_URL).unwrap());
}
