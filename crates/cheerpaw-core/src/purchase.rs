//! Coin purchase flow: confirmation, sign-in prompt and completion modals.
//!
//! Each modal is its own component owning its visibility. The only shared
//! piece of state, the offer awaiting confirmation, lives inside
//! [`ConfirmModal`] and is only touched by its `open` / `confirm` / `cancel`.
//!
//! The completion modal is never opened by a click. The server redirects back
//! with `?done=1&coins=N&price=P` after a purchase; the controller reads that
//! query once when it is constructed and then strips it from the visible URL
//! so a reload or a shared link does not show the modal again.

use std::time::Duration;

use url::Url;

use crate::anchors::{class, data, id};
use crate::config::InteractionConfig;
use crate::dom::{Document, ElementId};
use crate::error::{CheerError, CheerResult};
use crate::format::format_number;
use crate::page::{FormSubmission, Page};
use crate::timers::{TimerHandle, TimerTask};

/// Visibility of one modal region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    Shown,
}

/// A purchasable coin bundle, read from a purchase control at click time.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOffer {
    pub url: String,
    pub coins: f64,
    pub price: f64,
}

impl PurchaseOffer {
    /// Read `data-url`, `data-coins` and `data-price` from `control`.
    pub fn from_control(doc: &Document, control: ElementId) -> CheerResult<Self> {
        let url = doc
            .data(control, data::OFFER_URL)
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| CheerError::MissingAttribute("data-url".to_string()))?
            .to_string();
        Ok(Self {
            url,
            coins: numeric_data(doc, control, data::OFFER_COINS)?,
            price: numeric_data(doc, control, data::OFFER_PRICE)?,
        })
    }
}

fn numeric_data(doc: &Document, control: ElementId, key: &str) -> CheerResult<f64> {
    let name = format!("data-{}", key);
    let raw = doc
        .data(control, key)
        .ok_or_else(|| CheerError::MissingAttribute(name.clone()))?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| CheerError::InvalidAttribute {
            name,
            value: raw.to_string(),
        })
}

/// What the completion redirect reported.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReceipt {
    pub coins: f64,
    pub price: f64,
    /// `floor(coins / coins_per_point)`; negative when the coins are.
    pub points: i64,
}

impl CompletionReceipt {
    /// Parse a completion redirect. Returns `None` unless the first
    /// `<marker>` pair is `<marker>=1`. Missing or non-numeric amounts count
    /// as zero; negative amounts are kept as sent.
    pub fn from_location(location: &Url, marker: &str, coins_per_point: u64) -> Option<Self> {
        let mut done = None;
        let mut coins = None;
        let mut price = None;
        for (key, value) in location.query_pairs() {
            match key.as_ref() {
                k if k == marker && done.is_none() => done = Some(value == "1"),
                "coins" if coins.is_none() => coins = Some(parse_amount(&value)),
                "price" if price.is_none() => price = Some(parse_amount(&value)),
                _ => {}
            }
        }
        if done != Some(true) {
            return None;
        }
        let coins = coins.unwrap_or(0.0);
        let rate = coins_per_point.max(1) as f64;
        Some(Self {
            coins,
            price: price.unwrap_or(0.0),
            points: (coins / rate).floor() as i64,
        })
    }

    pub fn points_message(&self) -> String {
        format!("Earned {} stanning points!", self.points)
    }
}

fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

// ----------------------------------------------------------------------
// Confirmation
// ----------------------------------------------------------------------

/// Elements of the confirmation modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmAnchors {
    pub modal: ElementId,
    pub form: ElementId,
    pub ok: Option<ElementId>,
    pub cancel: Option<ElementId>,
    pub coins_text: Option<ElementId>,
    pub price_text: Option<ElementId>,
}

impl ConfirmAnchors {
    /// Requires the modal and the submission form.
    pub fn locate(doc: &Document) -> Option<Self> {
        Some(Self {
            modal: doc.get_element_by_id(id::CONFIRM_MODAL)?,
            form: doc.get_element_by_id(id::BUY_FORM)?,
            ok: doc.get_element_by_id(id::CONFIRM_OK),
            cancel: doc.get_element_by_id(id::CONFIRM_CANCEL),
            coins_text: doc.get_element_by_id(id::CONFIRM_COINS),
            price_text: doc.get_element_by_id(id::CONFIRM_PRICE),
        })
    }
}

#[derive(Debug)]
pub struct ConfirmModal {
    anchors: ConfirmAnchors,
    state: ModalState,
    pending: Option<PurchaseOffer>,
    cooldown: Duration,
    cooldown_timer: Option<TimerHandle>,
}

impl ConfirmModal {
    pub fn new(anchors: ConfirmAnchors, cooldown: Duration) -> Self {
        Self {
            anchors,
            state: ModalState::Hidden,
            pending: None,
            cooldown,
            cooldown_timer: None,
        }
    }

    pub fn anchors(&self) -> &ConfirmAnchors {
        &self.anchors
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn pending(&self) -> Option<&PurchaseOffer> {
        self.pending.as_ref()
    }

    /// Show the offer and hold it until confirmed or cancelled.
    pub fn open(&mut self, page: &mut Page, offer: PurchaseOffer) {
        let (doc, timers, _) = page.parts_mut();
        if let Some(el) = self.anchors.coins_text {
            doc.set_text(el, format_number(offer.coins));
        }
        if let Some(el) = self.anchors.price_text {
            doc.set_text(el, format_number(offer.price));
        }
        if let Some(timer) = self.cooldown_timer.take() {
            timers.clear(timer);
        }
        if let Some(ok) = self.anchors.ok {
            doc.set_disabled(ok, false);
        }
        doc.set_hidden(self.anchors.modal, false);
        tracing::info!(coins = offer.coins, price = offer.price, "purchase confirmation opened");
        self.pending = Some(offer);
        self.state = ModalState::Shown;
    }

    /// Submit the pending offer. The confirm control is disabled before the
    /// form goes out and the slot is emptied, so this can succeed at most
    /// once per opening.
    pub fn confirm(&mut self, page: &mut Page) -> Option<FormSubmission> {
        let offer = self.pending.take()?;
        let (doc, timers, _) = page.parts_mut();
        if let Some(ok) = self.anchors.ok {
            doc.set_disabled(ok, true);
            // Recover the button if the navigation never happens.
            self.cooldown_timer = Some(timers.set_timeout(self.cooldown, TimerTask::EnableControl(ok)));
        }
        doc.set_attribute(self.anchors.form, "action", offer.url.clone());
        page.submit_form(self.anchors.form)
    }

    /// Drop the pending offer and hide, with no other effect.
    pub fn cancel(&mut self, page: &mut Page) {
        self.pending = None;
        self.state = ModalState::Hidden;
        page.document_mut().set_hidden(self.anchors.modal, true);
    }
}

// ----------------------------------------------------------------------
// Sign-in prompt
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAnchors {
    pub modal: ElementId,
    pub cancel: Option<ElementId>,
    pub price_text: Option<ElementId>,
}

impl AuthAnchors {
    pub fn locate(doc: &Document) -> Option<Self> {
        Some(Self {
            modal: doc.get_element_by_id(id::AUTH_MODAL)?,
            cancel: doc.get_element_by_id(id::AUTH_CANCEL),
            price_text: doc.get_element_by_id(id::AUTH_PRICE),
        })
    }
}

/// Shown to signed-out viewers instead of the confirmation.
#[derive(Debug)]
pub struct AuthPromptModal {
    anchors: AuthAnchors,
    state: ModalState,
}

impl AuthPromptModal {
    pub fn new(anchors: AuthAnchors) -> Self {
        Self {
            anchors,
            state: ModalState::Hidden,
        }
    }

    pub fn anchors(&self) -> &AuthAnchors {
        &self.anchors
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn open(&mut self, doc: &mut Document, price: f64) {
        if let Some(el) = self.anchors.price_text {
            doc.set_text(el, format_number(price));
        }
        doc.set_hidden(self.anchors.modal, false);
        self.state = ModalState::Shown;
    }

    pub fn cancel(&mut self, doc: &mut Document) {
        doc.set_hidden(self.anchors.modal, true);
        self.state = ModalState::Hidden;
    }
}

// ----------------------------------------------------------------------
// Completion
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionAnchors {
    pub modal: ElementId,
    pub ok: Option<ElementId>,
    pub coins_text: Option<ElementId>,
    pub price_text: Option<ElementId>,
    pub points_text: Option<ElementId>,
}

impl CompletionAnchors {
    pub fn locate(doc: &Document) -> Option<Self> {
        Some(Self {
            modal: doc.get_element_by_id(id::DONE_MODAL)?,
            ok: doc.get_element_by_id(id::DONE_OK),
            coins_text: doc.get_element_by_id(id::DONE_COINS),
            price_text: doc.get_element_by_id(id::DONE_PRICE),
            points_text: doc.get_element_by_id(id::DONE_POINTS),
        })
    }
}

#[derive(Debug)]
pub struct CompletionModal {
    anchors: CompletionAnchors,
    state: ModalState,
}

impl CompletionModal {
    pub fn new(anchors: CompletionAnchors) -> Self {
        Self {
            anchors,
            state: ModalState::Hidden,
        }
    }

    pub fn anchors(&self) -> &CompletionAnchors {
        &self.anchors
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn show(&mut self, doc: &mut Document, receipt: &CompletionReceipt) {
        if let Some(el) = self.anchors.coins_text {
            doc.set_text(el, format_number(receipt.coins));
        }
        if let Some(el) = self.anchors.price_text {
            doc.set_text(el, format_number(receipt.price));
        }
        if let Some(el) = self.anchors.points_text {
            doc.set_text(el, receipt.points_message());
        }
        doc.set_hidden(self.anchors.modal, false);
        self.state = ModalState::Shown;
    }

    pub fn dismiss(&mut self, doc: &mut Document) {
        doc.set_hidden(self.anchors.modal, true);
        self.state = ModalState::Hidden;
    }
}

// ----------------------------------------------------------------------
// Controller
// ----------------------------------------------------------------------

#[derive(Debug)]
pub struct PurchaseFlowController {
    confirm: Option<ConfirmModal>,
    auth: Option<AuthPromptModal>,
    completion: Option<CompletionModal>,
    receipt: Option<CompletionReceipt>,
}

impl PurchaseFlowController {
    /// Locate the modals and consume the completion query, if any.
    pub fn new(page: &mut Page, config: &InteractionConfig) -> Self {
        let doc = page.document();
        let mut controller = Self {
            confirm: ConfirmAnchors::locate(doc)
                .map(|a| ConfirmModal::new(a, config.confirm_cooldown())),
            auth: AuthAnchors::locate(doc).map(AuthPromptModal::new),
            completion: CompletionAnchors::locate(doc).map(CompletionModal::new),
            receipt: None,
        };

        controller.receipt = CompletionReceipt::from_location(
            page.location(),
            &config.completion_param,
            config.coins_per_point,
        );
        if let Some(receipt) = &controller.receipt {
            tracing::info!(
                coins = receipt.coins,
                price = receipt.price,
                points = receipt.points,
                "purchase completion received"
            );
            if let Some(modal) = controller.completion.as_mut() {
                modal.show(page.document_mut(), receipt);
            }
            let path = page.location().path().to_string();
            if let Err(err) = page.replace_location(&path) {
                tracing::warn!(error = %err, "could not strip completion query");
            }
        }
        controller
    }

    pub fn confirm_modal(&self) -> Option<&ConfirmModal> {
        self.confirm.as_ref()
    }

    pub fn auth_modal(&self) -> Option<&AuthPromptModal> {
        self.auth.as_ref()
    }

    pub fn completion_modal(&self) -> Option<&CompletionModal> {
        self.completion.as_ref()
    }

    /// Receipt consumed from the URL at construction.
    pub fn receipt(&self) -> Option<&CompletionReceipt> {
        self.receipt.as_ref()
    }

    /// A purchase control was activated.
    pub fn offer_selected(&mut self, page: &mut Page, control: ElementId) -> bool {
        let offer = match PurchaseOffer::from_control(page.document(), control) {
            Ok(offer) => offer,
            Err(err) => {
                tracing::warn!(%control, error = %err, "purchase control has no usable offer");
                return false;
            }
        };

        if page.is_authenticated() {
            match self.confirm.as_mut() {
                Some(modal) => {
                    modal.open(page, offer);
                    true
                }
                None => false,
            }
        } else {
            match self.auth.as_mut() {
                Some(modal) => {
                    tracing::info!(price = offer.price, "sign-in prompt opened");
                    modal.open(page.document_mut(), offer.price);
                    true
                }
                None => false,
            }
        }
    }

    /// Route a click. Returns whether the purchase flow handled it.
    pub fn click(&mut self, page: &mut Page, target: ElementId) -> bool {
        if let Some(control) = page.document().closest(target, class::PURCHASE_BUTTON) {
            return self.offer_selected(page, control);
        }

        if let Some(modal) = self.confirm.as_mut() {
            let a = *modal.anchors();
            let doc = page.document();
            if a.ok.is_some_and(|ok| doc.contains(ok, target)) {
                modal.confirm(page);
                return true;
            }
            if a.cancel.is_some_and(|c| doc.contains(c, target)) || target == a.modal {
                modal.cancel(page);
                return true;
            }
        }

        if let Some(modal) = self.auth.as_mut() {
            let a = *modal.anchors();
            let doc = page.document();
            if a.cancel.is_some_and(|c| doc.contains(c, target)) || target == a.modal {
                modal.cancel(page.document_mut());
                return true;
            }
        }

        if let Some(modal) = self.completion.as_mut() {
            let a = *modal.anchors();
            let doc = page.document();
            if a.ok.is_some_and(|ok| doc.contains(ok, target)) || target == a.modal {
                modal.dismiss(page.document_mut());
                return true;
            }
        }

        false
    }
}
