//! Page-level wiring: one scan at load, one entry point per event kind, and
//! the timer pump.

use std::cell::RefCell;
use std::time::Duration;

use crate::anchors::{class, data, id};
use crate::api::CheerApi;
use crate::carousel::{CarouselController, CarouselId};
use crate::config::InteractionConfig;
use crate::dom::{DomEvent, ElementId, Rect};
use crate::like::{LikeButtonController, LikeOutcome, LikeRequest, WalletDisplay};
use crate::page::{Notice, Page};
use crate::purchase::PurchaseFlowController;
use crate::reveal::CardRevealSequencer;
use crate::shuffle::shuffle_children;
use crate::timers::TimerTask;

/// What a click turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing on the page reacts to this target.
    Unhandled,
    /// Handled synchronously.
    Handled,
    /// A like control took its busy guard; the caller performs the request
    /// and hands the result to [`Interactions::finish_like`].
    Like(LikeRequest),
}

/// Every controller of one page view, instantiated exactly once.
#[derive(Debug)]
pub struct Interactions {
    page: Page,
    config: InteractionConfig,
    likes: LikeButtonController,
    carousels: Vec<CarouselController>,
    reveal: CardRevealSequencer,
    purchase: PurchaseFlowController,
}

impl Interactions {
    /// DOM ready: shuffle `[data-shuffle]` containers, bind like controls,
    /// mount carousels, start the card reveal and build the purchase flow
    /// (which consumes the completion query, if present).
    pub fn boot(mut page: Page, config: InteractionConfig) -> Self {
        let body = page.document().body();

        let containers = page.document().query_attribute_all(body, data::SHUFFLE);
        for container in &containers {
            let (doc, _, rng) = page.parts_mut();
            shuffle_children(doc, *container, rng);
        }

        let mut likes = LikeButtonController::new(&config, WalletDisplay::locate(page.document()));
        let bound = likes.bind_all(page.document());

        let roots = page.document().query_class_all(body, class::CAROUSEL);
        let carousels: Vec<_> = roots
            .into_iter()
            .enumerate()
            .map(|(i, root)| {
                CarouselController::mount(
                    page.document_mut(),
                    CarouselId::new(i),
                    root,
                    config.carousel_interval(),
                )
            })
            .collect();

        let mut reveal = CardRevealSequencer::from_config(body, &config);
        if page.prefers_reduced_motion() {
            reveal.reveal_immediately(&mut page);
        } else {
            reveal.reveal(&mut page);
        }

        let purchase = PurchaseFlowController::new(&mut page, &config);

        tracing::info!(
            location = %page.location(),
            like_controls = bound,
            carousels = carousels.len(),
            shuffled = containers.len(),
            "page interactions ready"
        );

        Self {
            page,
            config,
            likes,
            carousels,
            reveal,
            purchase,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn likes(&self) -> &LikeButtonController {
        &self.likes
    }

    pub fn carousels(&self) -> &[CarouselController] {
        &self.carousels
    }

    pub fn carousel(&self, id: CarouselId) -> Option<&CarouselController> {
        self.carousels.get(id.index())
    }

    pub fn purchase(&self) -> &PurchaseFlowController {
        &self.purchase
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.page.take_notices()
    }

    /// Due time of the next timer, for hosts that sleep until then.
    pub fn next_due(&self) -> Option<Duration> {
        self.page.timers().next_due()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// A click on `target`. Clicks inside a disabled control never arrive,
    /// as in a browser.
    pub fn click(&mut self, target: ElementId) -> ClickOutcome {
        if self.inside_disabled_control(target) {
            tracing::trace!(%target, "click on disabled control dropped");
            return ClickOutcome::Unhandled;
        }

        let doc = self.page.document();

        if let Some(refresh) = doc.get_element_by_id(id::REFRESH_BUTTON) {
            if doc.contains(refresh, target) {
                self.reveal.reveal(&mut self.page);
                return ClickOutcome::Handled;
            }
        }

        if let Some(button) = doc.closest(target, class::LIKE_BUTTON) {
            if self.likes.is_bound(button) {
                return match self.likes.begin(&mut self.page, button) {
                    Some(request) => ClickOutcome::Like(request),
                    None => ClickOutcome::Handled,
                };
            }
        }

        if let Some(indicator) = doc.closest(target, class::CAROUSEL_INDICATOR) {
            let (doc, timers, _) = self.page.parts_mut();
            for carousel in &mut self.carousels {
                if let Some(index) = carousel.indicator_index(indicator) {
                    carousel.select(doc, timers, index);
                    return ClickOutcome::Handled;
                }
            }
        }

        if self.purchase.click(&mut self.page, target) {
            ClickOutcome::Handled
        } else {
            ClickOutcome::Unhandled
        }
    }

    fn inside_disabled_control(&self, target: ElementId) -> bool {
        let doc = self.page.document();
        let mut node = Some(target);
        while let Some(current) = node {
            if doc.is_disabled(current) {
                return true;
            }
            node = doc.element(current).and_then(|e| e.parent());
        }
        false
    }

    pub fn pointer_enter(&mut self, target: ElementId) {
        let timers = self.page.timers_mut();
        for carousel in self.carousels.iter_mut().filter(|c| c.root() == target) {
            carousel.pointer_enter(timers);
        }
        self.page.document_mut().dispatch(target, DomEvent::PointerEnter);
    }

    pub fn pointer_leave(&mut self, target: ElementId) {
        let timers = self.page.timers_mut();
        for carousel in self.carousels.iter_mut().filter(|c| c.root() == target) {
            carousel.pointer_leave(timers);
        }
        self.page.document_mut().dispatch(target, DomEvent::PointerLeave);
    }

    pub fn animation_end(&mut self, target: ElementId) {
        self.page.document_mut().dispatch(target, DomEvent::AnimationEnd);
    }

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    /// Take the busy guard of `button` directly (keyboard activation, tests).
    pub fn begin_like(&mut self, button: ElementId) -> Option<LikeRequest> {
        self.likes.begin(&mut self.page, button)
    }

    pub fn finish_like(
        &mut self,
        request: &LikeRequest,
        reply: crate::error::CheerResult<serde_json::Value>,
    ) -> LikeOutcome {
        self.likes.finish(&mut self.page, request, reply)
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Record the on-screen box the host measured for `element`.
    pub fn record_layout(&mut self, element: ElementId, rect: Rect) {
        self.page.document_mut().set_rect(element, rect);
    }

    /// Record the host's vertical scroll offset.
    pub fn record_scroll(&mut self, scroll_y: f64) {
        self.page.document_mut().set_scroll_y(scroll_y);
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Fire every timer due at or before `now`, in order, then move the
    /// clock to `now`. Returns how many fired.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some((_, task)) = self.page.timers_mut().pop_due(now) {
            self.apply(task);
            fired += 1;
        }
        self.page.timers_mut().advance_clock(now);
        fired
    }

    /// Advance by `delta` from the current page time.
    pub fn advance_by(&mut self, delta: Duration) -> usize {
        let now = self.page.now() + delta;
        self.advance_to(now)
    }

    fn apply(&mut self, task: TimerTask) {
        let doc = self.page.document_mut();
        match task {
            TimerTask::AddClass { element, class } => doc.add_class(element, &class),
            TimerTask::RemoveClass { element, class } => doc.remove_class(element, &class),
            TimerTask::RemoveElement(element) => doc.discard(element),
            TimerTask::EnableControl(element) => doc.set_disabled(element, false),
            TimerTask::CarouselTick(id) => {
                if let Some(carousel) = self.carousels.get_mut(id.index()) {
                    carousel.tick(doc);
                }
            }
        }
    }
}

/// Run one activation of `button` end to end.
///
/// The interaction state is only borrowed around the synchronous halves, so
/// other events (including a second activation) can be handled while the
/// request is pending. Returns `None` when the activation was ignored.
pub async fn activate_like(
    interactions: &RefCell<Interactions>,
    api: &dyn CheerApi,
    button: ElementId,
) -> Option<LikeOutcome> {
    let request = interactions.borrow_mut().begin_like(button)?;
    let reply = api.like(&request).await;
    Some(interactions.borrow_mut().finish_like(&request, reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementBuilder;
    use url::Url;

    fn boot(builder: ElementBuilder) -> (Interactions, ElementId) {
        let mut page = Page::new(Url::parse("http://localhost/").unwrap()).with_seed(1);
        let body = page.document().body();
        let root = page.document_mut().build(body, builder);
        (Interactions::boot(page, InteractionConfig::default()), root)
    }

    #[test]
    fn test_boot_schedules_staggered_reveal() {
        let (mut app, root) = boot(
            ElementBuilder::new("section")
                .children((0..3).map(|_| ElementBuilder::new("div").class("animal-card"))),
        );
        let cards = app.page().document().children(root).to_vec();

        app.advance_to(Duration::from_millis(120));
        assert!(app.page().document().has_class(cards[0], "is-revealed"));
        assert!(!app.page().document().has_class(cards[1], "is-revealed"));

        app.advance_to(Duration::from_millis(300));
        assert!(cards
            .iter()
            .all(|c| app.page().document().has_class(*c, "is-revealed")));
    }

    #[test]
    fn test_reduced_motion_reveals_at_once() {
        let mut page = Page::new(Url::parse("http://localhost/").unwrap()).with_reduced_motion(true);
        let body = page.document().body();
        let card = page
            .document_mut()
            .build(body, ElementBuilder::new("div").class("animal-card"));
        let app = Interactions::boot(page, InteractionConfig::default());
        assert!(app.page().document().has_class(card, "is-revealed"));
        assert_eq!(app.next_due(), None);
    }

    #[test]
    fn test_refresh_replays_reveal() {
        let (mut app, root) = boot(
            ElementBuilder::new("main")
                .child(ElementBuilder::new("button").id("refresh-btn").child(ElementBuilder::new("span")))
                .child(ElementBuilder::new("div").class("animal-card")),
        );
        app.advance_to(Duration::from_secs(1));
        let children = app.page().document().children(root).to_vec();
        let (refresh, card) = (children[0], children[1]);
        assert!(app.page().document().has_class(card, "is-revealed"));

        let label = app.page().document().children(refresh)[0];
        assert_eq!(app.click(label), ClickOutcome::Handled);
        assert!(!app.page().document().has_class(card, "is-revealed"));

        app.advance_by(Duration::from_millis(120));
        assert!(app.page().document().has_class(card, "is-revealed"));
    }

    #[test]
    fn test_click_inside_disabled_control_is_dropped() {
        let (mut app, root) = boot(
            ElementBuilder::new("button")
                .id("refresh-btn")
                .disabled(true)
                .child(ElementBuilder::new("span")),
        );
        let label = app.page().document().children(root)[0];
        assert_eq!(app.click(label), ClickOutcome::Unhandled);
    }

    #[test]
    fn test_shuffle_keeps_children() {
        let (app, root) = boot(
            ElementBuilder::new("ul")
                .attr("data-shuffle", "")
                .children((0..6).map(|i| ElementBuilder::new("li").text(i.to_string()))),
        );
        let mut texts: Vec<_> = app
            .page()
            .document()
            .children(root)
            .iter()
            .map(|c| app.page().document().text(*c).unwrap_or("").to_string())
            .collect();
        texts.sort();
        assert_eq!(texts, vec!["0", "1", "2", "3", "4", "5"]);
    }
}
