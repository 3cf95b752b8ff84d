//! Hover-gated image carousel.
//!
//! ```text
//!            pointer enter (>1 slide: start timer)
//!   Idle  ─────────────────────────────────────────▶  Hovering { timer }
//!         ◀─────────────────────────────────────────
//!            pointer leave (clear timer)
//!
//!   Hovering: timer tick    → next slide
//!             indicator     → jump, restart timer
//!   Idle:     indicator     → jump
//! ```

use std::time::Duration;

use crate::anchors::{class, data};
use crate::dom::{Document, ElementBuilder, ElementId};
use crate::timers::{TimerHandle, TimerTask, Timers};

/// Index of a carousel within one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarouselId(usize);

impl CarouselId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Autoplay state. A timer only ever exists while the pointer is over the
/// carousel and there is more than one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autoplay {
    Idle,
    Hovering { timer: Option<TimerHandle> },
}

#[derive(Debug)]
pub struct CarouselController {
    id: CarouselId,
    root: ElementId,
    slides: Vec<ElementId>,
    indicators: Vec<ElementId>,
    current: usize,
    autoplay: Autoplay,
    interval: Duration,
}

impl CarouselController {
    /// Attach to the carousel rooted at `root`: collect slides, build one
    /// indicator per slide if an indicator container exists, show slide 0.
    ///
    /// The root's `data-interval` (milliseconds) overrides `default_interval`.
    pub fn mount(
        doc: &mut Document,
        id: CarouselId,
        root: ElementId,
        default_interval: Duration,
    ) -> Self {
        let slides = doc.query_class_all(root, class::CAROUSEL_SLIDE);
        let interval = doc
            .data(root, data::CAROUSEL_INTERVAL)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(default_interval);

        let indicators = match doc.query_class(root, class::CAROUSEL_INDICATORS) {
            Some(container) => {
                for stale in doc.children(container).to_vec() {
                    doc.discard(stale);
                }
                (0..slides.len())
                    .map(|i| {
                        doc.build(
                            container,
                            ElementBuilder::new("button")
                                .class(class::CAROUSEL_INDICATOR)
                                .attr("type", "button")
                                .attr("aria-label", format!("Slide {}", i + 1))
                                .data(data::INDICATOR_INDEX, i.to_string()),
                        )
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let mut carousel = Self {
            id,
            root,
            slides,
            indicators,
            current: 0,
            autoplay: Autoplay::Idle,
            interval,
        };
        carousel.go_to(doc, 0);
        tracing::debug!(
            carousel = id.index(),
            slides = carousel.slides.len(),
            interval_ms = interval.as_millis() as u64,
            "carousel mounted"
        );
        carousel
    }

    pub fn id(&self) -> CarouselId {
        self.id
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    pub fn indicators(&self) -> &[ElementId] {
        &self.indicators
    }

    pub fn autoplay(&self) -> Autoplay {
        self.autoplay
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_hovering(&self) -> bool {
        matches!(self.autoplay, Autoplay::Hovering { .. })
    }

    /// Running autoplay timer, if any.
    pub fn timer(&self) -> Option<TimerHandle> {
        match self.autoplay {
            Autoplay::Hovering { timer } => timer,
            Autoplay::Idle => None,
        }
    }

    /// Show slide `index`, wrapping in both directions. Returns the slide
    /// actually shown, or `None` for an empty carousel.
    pub fn go_to(&mut self, doc: &mut Document, index: isize) -> Option<usize> {
        if self.slides.is_empty() {
            return None;
        }
        let target = index.rem_euclid(self.slides.len() as isize) as usize;

        for slide in &self.slides {
            doc.remove_class(*slide, class::ACTIVE);
        }
        for indicator in &self.indicators {
            doc.remove_class(*indicator, class::ACTIVE);
        }
        doc.add_class(self.slides[target], class::ACTIVE);
        if let Some(indicator) = self.indicators.get(target) {
            doc.add_class(*indicator, class::ACTIVE);
        }
        self.current = target;
        Some(target)
    }

    /// Autoplay timer fired.
    pub fn tick(&mut self, doc: &mut Document) {
        let next = self.current as isize + 1;
        self.go_to(doc, next);
    }

    pub fn pointer_enter(&mut self, timers: &mut Timers) {
        let timer = match self.autoplay {
            Autoplay::Hovering { timer: Some(timer) } => Some(timer),
            _ => self.start_timer(timers),
        };
        self.autoplay = Autoplay::Hovering { timer };
    }

    /// Stop autoplay. Safe to call in any state.
    pub fn pointer_leave(&mut self, timers: &mut Timers) {
        if let Some(timer) = self.timer() {
            timers.clear(timer);
        }
        self.autoplay = Autoplay::Idle;
    }

    /// Position of `element` among this carousel's indicators.
    pub fn indicator_index(&self, element: ElementId) -> Option<usize> {
        self.indicators.iter().position(|i| *i == element)
    }

    /// An indicator was clicked: jump to its slide and, while hovering,
    /// restart the cadence from this interaction.
    pub fn select(&mut self, doc: &mut Document, timers: &mut Timers, index: usize) {
        self.go_to(doc, index as isize);
        if let Autoplay::Hovering { timer } = self.autoplay {
            if let Some(timer) = timer {
                timers.clear(timer);
            }
            self.autoplay = Autoplay::Hovering {
                timer: self.start_timer(timers),
            };
        }
    }

    fn start_timer(&self, timers: &mut Timers) -> Option<TimerHandle> {
        if self.slides.len() <= 1 {
            return None;
        }
        Some(timers.set_interval(self.interval, TimerTask::CarouselTick(self.id)))
    }
}
