//! Random ordering of a container's children.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::dom::{Document, ElementId};

/// Shuffle the direct children of `container` uniformly (Fisher-Yates) and
/// re-render them in the new order. Returns the new order.
pub fn shuffle_children<R: Rng + ?Sized>(
    doc: &mut Document,
    container: ElementId,
    rng: &mut R,
) -> Vec<ElementId> {
    let mut order = doc.children(container).to_vec();
    order.shuffle(rng);
    doc.reorder_children(container, order.clone());
    order
}
