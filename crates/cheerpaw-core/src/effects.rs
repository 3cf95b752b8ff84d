//! Floating heart markers.

use std::time::Duration;

use rand::Rng;

use crate::anchors::class;
use crate::config::InteractionConfig;
use crate::dom::ElementId;
use crate::page::Page;
use crate::timers::TimerTask;

const HEART: &str = "❤️";

/// Spawns short-lived decorative markers above a trigger element.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSpawner {
    count: usize,
    lifetime: Duration,
    spread_px: f64,
}

impl EffectSpawner {
    pub fn new(count: usize, lifetime: Duration, spread_px: f64) -> Self {
        Self {
            count,
            lifetime,
            spread_px,
        }
    }

    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(
            config.heart_count,
            config.heart_lifetime(),
            config.heart_spread_px,
        )
    }

    /// Append markers to the body, centred horizontally on `anchor` with
    /// random jitter, and schedule each one's removal.
    pub fn spawn(&self, page: &mut Page, anchor: ElementId) -> Vec<ElementId> {
        let (doc, timers, rng) = page.parts_mut();
        let rect = doc.rect(anchor);
        let start_x = rect.left + rect.width / 2.0;
        let start_y = rect.top + doc.scroll_y() + 4.0;
        let body = doc.body();

        let mut spawned = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            let offset_x = (rng.random::<f64>() - 0.5) * self.spread_px;
            let heart = doc.create_element("span");
            doc.add_class(heart, class::HEART);
            doc.set_text(heart, HEART);
            doc.set_style(heart, "left", format!("{}px", start_x + offset_x));
            doc.set_style(heart, "top", format!("{}px", start_y));
            doc.append_child(body, heart);
            timers.set_timeout(self.lifetime, TimerTask::RemoveElement(heart));
            spawned.push(heart);
        }
        tracing::trace!(count = spawned.len(), %anchor, "hearts spawned");
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementBuilder, Rect};
    use url::Url;

    #[test]
    fn test_hearts_anchor_on_trigger() {
        let mut page = Page::new(Url::parse("http://localhost/").unwrap()).with_seed(7);
        page.document_mut().set_scroll_y(100.0);
        let body = page.document().body();
        let button = page.document_mut().build(
            body,
            ElementBuilder::new("button").rect(Rect::new(200.0, 50.0, 40.0, 20.0)),
        );

        let spawner = EffectSpawner::new(3, Duration::from_millis(1000), 60.0);
        let hearts = spawner.spawn(&mut page, button);
        assert_eq!(hearts.len(), 3);

        for heart in &hearts {
            let doc = page.document();
            assert!(doc.is_connected(*heart));
            assert!(doc.has_class(*heart, "heart"));
            assert_eq!(doc.style(*heart, "top"), Some("154px"));
            let left: f64 = doc
                .style(*heart, "left")
                .unwrap()
                .trim_end_matches("px")
                .parse()
                .unwrap();
            assert!((190.0..=250.0).contains(&left), "left = {left}");
        }
        assert_eq!(page.timers().len(), 3);
    }

    #[test]
    fn test_zero_count_spawns_nothing() {
        let mut page = Page::new(Url::parse("http://localhost/").unwrap());
        let body = page.document().body();
        let spawner = EffectSpawner::new(0, Duration::from_millis(1000), 60.0);
        assert!(spawner.spawn(&mut page, body).is_empty());
        assert!(page.timers().is_empty());
    }
}
