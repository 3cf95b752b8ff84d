//! Property-based tests for carousel wrap-around, shuffling and number formatting.

use std::time::Duration;

use cheerpaw_core::carousel::{CarouselController, CarouselId};
use cheerpaw_core::dom::{Document, ElementBuilder};
use cheerpaw_core::format::{format_number, group_thousands};
use cheerpaw_core::shuffle_children;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mounted(slides: usize) -> (Document, CarouselController) {
    let mut doc = Document::new();
    let root = doc.build(
        doc.body(),
        ElementBuilder::new("div")
            .class("carousel")
            .children((0..slides).map(|_| ElementBuilder::new("img").class("carousel-slide"))),
    );
    let carousel = CarouselController::mount(&mut doc, CarouselId::new(0), root, Duration::from_secs(4));
    (doc, carousel)
}

proptest! {
    /// Any index lands on the slide congruent to it modulo the slide count
    #[test]
    fn go_to_wraps_modulo_len(slides in 1usize..12, index in -1000isize..1000) {
        let (mut doc, mut carousel) = mounted(slides);
        let shown = carousel.go_to(&mut doc, index).unwrap();
        prop_assert_eq!(shown as isize, index.rem_euclid(slides as isize));
        prop_assert!(doc.has_class(carousel.slides()[shown], "is-active"));
    }

    /// Ticking N times on an N-slide carousel comes back to the start
    #[test]
    fn full_cycle_returns_home(slides in 1usize..10, start in 0usize..10) {
        let (mut doc, mut carousel) = mounted(slides);
        carousel.go_to(&mut doc, start as isize);
        let home = carousel.current();
        for _ in 0..slides {
            carousel.tick(&mut doc);
        }
        prop_assert_eq!(carousel.current(), home);
    }

    /// Shuffling is a permutation of the original children
    #[test]
    fn shuffle_is_permutation(count in 0usize..40, seed in any::<u64>()) {
        let mut doc = Document::new();
        let list = doc.build(
            doc.body(),
            ElementBuilder::new("ul").children((0..count).map(|_| ElementBuilder::new("li"))),
        );
        let mut before = doc.children(list).to_vec();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut after = shuffle_children(&mut doc, list, &mut rng);
        prop_assert_eq!(doc.children(list), after.as_slice());
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    /// Whole numbers format exactly like grouped integers
    #[test]
    fn whole_numbers_format_as_grouped(value in 0u64..(1u64 << 50)) {
        prop_assert_eq!(format_number(value as f64), group_thousands(value));
    }

    /// Grouped output parses back to the same integer
    #[test]
    fn grouping_preserves_value(value in any::<u64>()) {
        let grouped = group_thousands(value);
        prop_assert_eq!(grouped.replace(',', "").parse::<u64>().unwrap(), value);
    }
}
