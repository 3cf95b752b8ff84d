//! Cheer ("like") controls on animal cards.
//!
//! An activation runs in three steps so that the single suspension point is
//! explicit:
//!
//! 1. [`LikeButtonController::begin`]: synchronous guard. An in-flight control
//!    ignores the activation; an idle one is marked busy and disabled before
//!    anything else happens.
//! 2. [`CheerApi::like`](crate::api::CheerApi::like): the network call.
//! 3. [`LikeButtonController::finish`]: synchronous classification and DOM
//!    fan-out, then the guard is released whatever the outcome.
//!
//! The controller never caches a card's total: it writes whatever the server
//! returned straight into the card's point display.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::anchors::{class, data, id};
use crate::config::InteractionConfig;
use crate::cookie::read_cookie;
use crate::dom::{Document, DomEvent, ElementId, ListenerAction};
use crate::effects::EffectSpawner;
use crate::error::CheerResult;
use crate::format::format_number;
use crate::page::Page;
use crate::timers::{TimerHandle, TimerTask};

/// Shown for transport failures, non-2xx statuses and unexpected payloads.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Per-control activation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Idle,
    InFlight,
}

/// Everything the network call needs, captured when the guard was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeRequest {
    pub button: ElementId,
    pub card_id: String,
    /// Endpoint path, e.g. `/like/otter-1/`.
    pub path: String,
    pub csrf_header: String,
    pub csrf_token: Option<String>,
}

/// Fields of a successful cheer response.
#[derive(Debug, Clone, PartialEq)]
pub struct LikeSuccess {
    pub total_point: i64,
    pub cheer_coin_balance: Option<f64>,
    pub stanning_point_balance: Option<f64>,
}

/// Shape of a 2xx response body.
#[derive(Debug, Clone, PartialEq)]
pub enum LikeReply {
    Success(LikeSuccess),
    /// Application-level error with a message for the viewer.
    Rejected(String),
    Unrecognized,
}

impl LikeReply {
    pub fn classify(body: &Value) -> Self {
        if let Some(total_point) = body.get("total_point").and_then(as_integer) {
            return LikeReply::Success(LikeSuccess {
                total_point,
                cheer_coin_balance: body.get("cheer_coin_balance").and_then(as_number),
                stanning_point_balance: body.get("stanning_point_balance").and_then(as_number),
            });
        }
        match body.get("error").and_then(Value::as_str) {
            Some(message) => LikeReply::Rejected(message.to_string()),
            None => LikeReply::Unrecognized,
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        let f = value.as_f64()?;
        (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
    })
}

fn as_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str()?.trim().parse().ok())
        .filter(|n: &f64| n.is_finite())
}

/// How one activation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum LikeOutcome {
    Applied { total: i64 },
    Rejected { message: String },
    Failed { reason: String },
}

/// The page-wide wallet summary, if the page has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalletDisplay {
    pub balance: Option<ElementId>,
    pub points: Option<ElementId>,
}

impl WalletDisplay {
    pub fn locate(doc: &Document) -> Self {
        Self {
            balance: doc.get_element_by_id(id::WALLET_BALANCE),
            points: doc.get_element_by_id(id::WALLET_POINTS),
        }
    }

    /// Overwrite the balances present in `success`; absent ones stay as they are.
    pub fn apply(&self, doc: &mut Document, success: &LikeSuccess) {
        if let (Some(el), Some(coins)) = (self.balance, success.cheer_coin_balance) {
            doc.set_text(el, format_number(coins));
        }
        if let (Some(el), Some(points)) = (self.points, success.stanning_point_balance) {
            doc.set_text(el, format_number(points));
        }
    }
}

/// The card around a like control and the parts a cheer animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementCard {
    pub root: ElementId,
    pub point: Option<ElementId>,
    pub badge: Option<ElementId>,
    pub media: Option<ElementId>,
    pub image: Option<ElementId>,
}

impl EngagementCard {
    pub fn locate(doc: &Document, control: ElementId) -> Option<Self> {
        let root = doc.closest(control, class::ANIMAL_CARD)?;
        let media = doc.query_class(root, class::MEDIA);
        Some(Self {
            root,
            point: doc.query_class(root, class::POINT),
            badge: doc.query_class(root, class::BADGE),
            media,
            image: media.and_then(|m| doc.query_tag(m, "img")),
        })
    }
}

#[derive(Debug)]
pub struct LikeButtonController {
    config: InteractionConfig,
    csrf_cookie: String,
    csrf_header: String,
    flash: Duration,
    wallet: WalletDisplay,
    effects: EffectSpawner,
    states: HashMap<ElementId, LikeState>,
    flash_timers: HashMap<ElementId, TimerHandle>,
}

impl LikeButtonController {
    pub fn new(config: &InteractionConfig, wallet: WalletDisplay) -> Self {
        Self {
            config: config.clone(),
            csrf_cookie: config.csrf_cookie.clone(),
            csrf_header: config.csrf_header.clone(),
            flash: config.flash(),
            wallet,
            effects: EffectSpawner::from_config(config),
            states: HashMap::new(),
            flash_timers: HashMap::new(),
        }
    }

    /// Bind every like control currently in the document.
    pub fn bind_all(&mut self, doc: &Document) -> usize {
        let buttons = doc.query_class_all(doc.body(), class::LIKE_BUTTON);
        for button in &buttons {
            self.states.entry(*button).or_insert(LikeState::Idle);
        }
        buttons.len()
    }

    pub fn is_bound(&self, button: ElementId) -> bool {
        self.states.contains_key(&button)
    }

    pub fn state(&self, button: ElementId) -> Option<LikeState> {
        self.states.get(&button).copied()
    }

    /// Take the busy guard for `button`. Returns `None` when the control is
    /// not bound or a request is already in flight.
    pub fn begin(&mut self, page: &mut Page, button: ElementId) -> Option<LikeRequest> {
        match self.states.get(&button) {
            Some(LikeState::Idle) => {}
            Some(LikeState::InFlight) => {
                tracing::debug!(%button, "cheer ignored, request in flight");
                return None;
            }
            None => return None,
        }

        let Some(card_id) = page
            .document()
            .data(button, data::CARD_ID)
            .map(str::to_string)
        else {
            tracing::warn!(%button, "like control without a card id");
            page.alert(GENERIC_FAILURE);
            return None;
        };

        self.states.insert(button, LikeState::InFlight);
        let doc = page.document_mut();
        doc.set_disabled(button, true);
        doc.add_class(button, class::BUSY);

        let request = LikeRequest {
            button,
            path: self.config.like_path(&card_id),
            card_id,
            csrf_header: self.csrf_header.clone(),
            csrf_token: read_cookie(page.cookies(), &self.csrf_cookie),
        };
        tracing::info!(card_id = %request.card_id, "cheer sent");
        Some(request)
    }

    /// Apply the network result and release the guard.
    pub fn finish(
        &mut self,
        page: &mut Page,
        request: &LikeRequest,
        reply: CheerResult<Value>,
    ) -> LikeOutcome {
        let outcome = self.settle(page, request, reply);
        self.release(page, request.button);
        outcome
    }

    fn settle(&mut self, page: &mut Page, request: &LikeRequest, reply: CheerResult<Value>) -> LikeOutcome {
        let body = match reply {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(card_id = %request.card_id, error = %err, "cheer request failed");
                page.alert(GENERIC_FAILURE);
                return LikeOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        match LikeReply::classify(&body) {
            LikeReply::Success(success) => {
                self.apply_success(page, request.button, &success);
                tracing::info!(
                    card_id = %request.card_id,
                    total = success.total_point,
                    "cheer applied"
                );
                LikeOutcome::Applied {
                    total: success.total_point,
                }
            }
            LikeReply::Rejected(message) => {
                tracing::info!(card_id = %request.card_id, %message, "cheer rejected");
                page.alert(message.clone());
                LikeOutcome::Rejected { message }
            }
            LikeReply::Unrecognized => {
                tracing::warn!(card_id = %request.card_id, %body, "unrecognized cheer response");
                page.alert(GENERIC_FAILURE);
                LikeOutcome::Failed {
                    reason: "unrecognized response".to_string(),
                }
            }
        }
    }

    fn release(&mut self, page: &mut Page, button: ElementId) {
        self.states.insert(button, LikeState::Idle);
        let doc = page.document_mut();
        doc.set_disabled(button, false);
        doc.remove_class(button, class::BUSY);
    }

    fn apply_success(&mut self, page: &mut Page, button: ElementId, success: &LikeSuccess) {
        let card = EngagementCard::locate(page.document(), button);

        if let Some(point) = card.and_then(|c| c.point) {
            let (doc, timers, _) = page.parts_mut();
            doc.set_text(point, success.total_point.to_string());
            doc.add_class(point, class::FLASH);
            if let Some(previous) = self.flash_timers.remove(&point) {
                timers.clear(previous);
            }
            let handle = timers.set_timeout(
                self.flash,
                TimerTask::RemoveClass {
                    element: point,
                    class: class::FLASH.to_string(),
                },
            );
            self.flash_timers.insert(point, handle);
        }

        if let Some(badge) = card.and_then(|c| c.badge) {
            page.document_mut().restart_animation(badge, class::POP);
        }

        self.wallet.apply(page.document_mut(), success);

        self.effects.spawn(page, button);

        if let Some(EngagementCard {
            media: Some(media),
            image: Some(image),
            ..
        }) = card
        {
            hover_lock(page.document_mut(), media, image);
        }
    }
}

/// Keep the card image zoomed and shake its wrapper once.
///
/// The shake class goes away when its animation ends, the zoom when the
/// pointer leaves the media area; each release runs at most once.
fn hover_lock(doc: &mut Document, media: ElementId, image: ElementId) {
    doc.add_class(image, class::HOVER_LOCK);
    doc.restart_animation(media, class::SHAKE);
    doc.listen_once(
        media,
        DomEvent::AnimationEnd,
        ListenerAction::RemoveClass {
            element: media,
            class: class::SHAKE.to_string(),
        },
    );
    doc.listen_once(
        media,
        DomEvent::PointerLeave,
        ListenerAction::RemoveClass {
            element: image,
            class: class::HOVER_LOCK.to_string(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_success_with_wallet() {
        let reply = LikeReply::classify(&json!({
            "total_point": 5,
            "cheer_coin_balance": 1200,
            "stanning_point_balance": 12
        }));
        assert_eq!(
            reply,
            LikeReply::Success(LikeSuccess {
                total_point: 5,
                cheer_coin_balance: Some(1200.0),
                stanning_point_balance: Some(12.0),
            })
        );
    }

    #[test]
    fn test_classify_partial_wallet() {
        let LikeReply::Success(success) = LikeReply::classify(&json!({"total_point": 9})) else {
            panic!("expected success");
        };
        assert_eq!(success.cheer_coin_balance, None);
        assert_eq!(success.stanning_point_balance, None);
    }

    #[test]
    fn test_classify_error_message() {
        assert_eq!(
            LikeReply::classify(&json!({"error": "Not enough cheer coins."})),
            LikeReply::Rejected("Not enough cheer coins.".to_string())
        );
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(LikeReply::classify(&json!({"ok": true})), LikeReply::Unrecognized);
        assert_eq!(LikeReply::classify(&json!([1, 2])), LikeReply::Unrecognized);
        assert_eq!(
            LikeReply::classify(&json!({"total_point": "five"})),
            LikeReply::Unrecognized
        );
        assert_eq!(
            LikeReply::classify(&json!({"total_point": 4.5})),
            LikeReply::Unrecognized
        );
    }

    #[test]
    fn test_total_wins_over_error() {
        let reply = LikeReply::classify(&json!({"total_point": 3, "error": "ignored"}));
        assert!(matches!(reply, LikeReply::Success(_)));
    }

    #[test]
    fn test_numeric_strings_accepted_for_wallet() {
        let LikeReply::Success(success) =
            LikeReply::classify(&json!({"total_point": 1, "cheer_coin_balance": "300"}))
        else {
            panic!("expected success");
        };
        assert_eq!(success.cheer_coin_balance, Some(300.0));
    }
}
