//! Staggered card reveal.

use std::time::Duration;

use crate::anchors::class;
use crate::config::InteractionConfig;
use crate::dom::ElementId;
use crate::page::Page;
use crate::timers::{TimerHandle, TimerTask};

/// Reveals the cards of a container one after another.
///
/// Each run hides every card, then schedules `is-revealed` at
/// `initial + index * stagger`. Starting a new run cancels whatever the
/// previous run had not revealed yet.
#[derive(Debug)]
pub struct CardRevealSequencer {
    container: ElementId,
    initial: Duration,
    stagger: Duration,
    pending: Vec<TimerHandle>,
}

impl CardRevealSequencer {
    pub fn new(container: ElementId, initial: Duration, stagger: Duration) -> Self {
        Self {
            container,
            initial,
            stagger,
            pending: Vec::new(),
        }
    }

    pub fn from_config(container: ElementId, config: &InteractionConfig) -> Self {
        Self::new(container, config.reveal_initial(), config.reveal_stagger())
    }

    /// Hide all cards and schedule their staggered reveal. Returns the
    /// reveal time (relative to now) assigned to each card, in order.
    pub fn reveal(&mut self, page: &mut Page) -> Vec<(ElementId, Duration)> {
        self.cancel(page);

        let (doc, timers, _) = page.parts_mut();
        let cards = doc.query_class_all(self.container, class::ANIMAL_CARD);
        let mut plan = Vec::with_capacity(cards.len());
        for (i, card) in cards.into_iter().enumerate() {
            doc.remove_class(card, class::REVEALED);
            let delay = self.initial + self.stagger * i as u32;
            let handle = timers.set_timeout(
                delay,
                TimerTask::AddClass {
                    element: card,
                    class: class::REVEALED.to_string(),
                },
            );
            self.pending.push(handle);
            plan.push((card, delay));
        }
        tracing::debug!(cards = plan.len(), "card reveal scheduled");
        plan
    }

    /// Reveal every card at once (reduced motion).
    pub fn reveal_immediately(&mut self, page: &mut Page) {
        self.cancel(page);
        let doc = page.document_mut();
        for card in doc.query_class_all(self.container, class::ANIMAL_CARD) {
            doc.add_class(card, class::REVEALED);
        }
    }

    fn cancel(&mut self, page: &mut Page) {
        for handle in self.pending.drain(..) {
            page.timers_mut().clear(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementBuilder;
    use url::Url;

    fn page_with_cards(n: usize) -> (Page, ElementId) {
        let mut page = Page::new(Url::parse("http://localhost/").unwrap());
        let body = page.document().body();
        let grid = page.document_mut().build(
            body,
            ElementBuilder::new("section").children(
                (0..n).map(|_| ElementBuilder::new("article").class("animal-card is-revealed")),
            ),
        );
        (page, grid)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_reveal_staggers_cards() {
        let (mut page, grid) = page_with_cards(3);
        let mut seq = CardRevealSequencer::new(grid, ms(120), ms(90));

        let plan = seq.reveal(&mut page);
        let delays: Vec<_> = plan.iter().map(|(_, d)| *d).collect();
        assert_eq!(delays, vec![ms(120), ms(210), ms(300)]);

        for (card, _) in &plan {
            assert!(!page.document().has_class(*card, "is-revealed"));
        }
        assert_eq!(page.timers().len(), 3);
    }

    #[test]
    fn test_replay_cancels_previous_run() {
        let (mut page, grid) = page_with_cards(4);
        let mut seq = CardRevealSequencer::new(grid, ms(120), ms(90));
        seq.reveal(&mut page);
        seq.reveal(&mut page);
        assert_eq!(page.timers().len(), 4);
    }

    #[test]
    fn test_reveal_immediately() {
        let (mut page, grid) = page_with_cards(2);
        let mut seq = CardRevealSequencer::new(grid, ms(120), ms(90));
        seq.reveal(&mut page);
        seq.reveal_immediately(&mut page);
        assert!(page.timers().is_empty());
        for card in page.document().query_class_all(grid, "animal-card") {
            assert!(page.document().has_class(card, "is-revealed"));
        }
    }
}
