//! Synthetic document model.
//!
//! Controllers never talk to a real browser. They read and write this arena of
//! elements instead, and the desktop host renders it. The model keeps just
//! enough of the DOM to express the interaction layer:
//!
//! - element identity (`id` attribute), classes, attributes, text and inline style
//! - the parent/child tree, with detach semantics for removed elements
//! - a disabled flag for controls
//! - a layout rectangle written by the host, plus a layout-flush counter
//! - once-listeners that deregister themselves when they fire
//!
//! [`Document::remove`] only detaches, so a late response can still write to
//! a removed card. [`Document::discard`] frees the subtree for reuse; ids are
//! generational, so a stale [`ElementId`] never resolves to the new occupant.

mod builder;

use std::collections::BTreeMap;
use std::fmt;

pub use builder::ElementBuilder;

/// Handle to an element inside one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl ElementId {
    /// Position of the element in the document arena.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// How many times the slot was freed before this element took it.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "e{}", self.index)
        } else {
            write!(f, "e{}v{}", self.index, self.generation)
        }
    }
}

/// Screen-space box of an element, in CSS pixels relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// UI events the host forwards into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEvent {
    Click,
    PointerEnter,
    PointerLeave,
    AnimationEnd,
}

/// What a once-listener does when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerAction {
    RemoveClass { element: ElementId, class: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OnceListener {
    target: ElementId,
    event: DomEvent,
    action: ListenerAction,
}

/// A single node of the document.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    style: BTreeMap<String, String>,
    disabled: bool,
    rect: Rect,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            style: BTreeMap::new(),
            disabled: false,
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute, if any.
    pub fn dom_id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-joined class list, as it would appear in markup.
    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reads `data-<key>`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attribute(&format!("data-{}", key))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Inline style serialized as `prop: value; ...`.
    pub fn style_attr(&self) -> String {
        self.style
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_hidden(&self) -> bool {
        self.style("display") == Some("none")
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Arena-backed element tree with a single `body` root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Slot>,
    free: Vec<u32>,
    body: ElementId,
    listeners: Vec<OnceListener>,
    scroll_y: f64,
    layout_flushes: u64,
    generation: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Slot {
                generation: 0,
                element: Some(Element::new("body")),
            }],
            free: Vec::new(),
            body: ElementId {
                index: 0,
                generation: 0,
            },
            listeners: Vec::new(),
            scroll_y: 0.0,
            layout_flushes: 0,
            generation: 0,
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.generation += 1;
        self.slot_element_mut(id)
    }

    fn slot_element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    /// Number of live elements, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.element.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped on every mutation; hosts use it to know when to re-render.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of forced layout flushes performed so far.
    pub fn layout_flushes(&self) -> u64 {
        self.layout_flushes
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.generation += 1;
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.nodes.get_mut(index as usize) {
                slot.element = Some(Element::new(tag));
                return ElementId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.nodes.push(Slot {
            generation: 0,
            element: Some(Element::new(tag)),
        });
        ElementId {
            index: (self.nodes.len() - 1) as u32,
            generation: 0,
        }
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.element(parent).is_none() || self.element(child).is_none() {
            return;
        }
        if self.is_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.element_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.element_mut(parent) {
            node.children.push(child);
        }
    }

    /// Detach an element from its parent. The element and its subtree stay
    /// addressable but are no longer connected to the body.
    pub fn remove(&mut self, id: ElementId) {
        self.detach(id);
    }

    /// Detach an element and free it with its whole subtree. Its slots are
    /// reused by later elements; the old ids stop resolving, and pending
    /// once-listeners that mention them are dropped. The body is never freed.
    pub fn discard(&mut self, id: ElementId) {
        if id == self.body || self.element(id).is_none() {
            return;
        }
        self.detach(id);
        let mut freed = self.descendants(id);
        freed.push(id);
        for gone in &freed {
            if let Some(slot) = self.nodes.get_mut(gone.index()) {
                slot.element = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(gone.index);
            }
        }
        self.listeners.retain(|l| {
            let ListenerAction::RemoveClass { element, .. } = &l.action;
            !freed.contains(&l.target) && !freed.contains(element)
        });
        self.generation += 1;
    }

    fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.element(id).and_then(Element::parent) else {
            return;
        };
        if let Some(node) = self.element_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.element_mut(id) {
            node.parent = None;
        }
    }

    fn is_ancestor(&self, ancestor: ElementId, of: ElementId) -> bool {
        let mut current = self.element(of).and_then(Element::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.element(id).and_then(Element::parent);
        }
        false
    }

    /// Whether `node` is `ancestor` or sits somewhere below it.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        ancestor == node || self.is_ancestor(ancestor, node)
    }

    /// Whether the element is reachable from the body.
    pub fn is_connected(&self, id: ElementId) -> bool {
        id == self.body || self.is_ancestor(self.body, id)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map(Element::children).unwrap_or(&[])
    }

    /// Re-render the children of `parent` in the given order.
    ///
    /// `order` must be a permutation of the current children; anything else
    /// is rejected and leaves the tree untouched.
    pub fn reorder_children(&mut self, parent: ElementId, order: Vec<ElementId>) -> bool {
        let Some(node) = self.element(parent) else {
            return false;
        };
        let mut current = node.children.clone();
        let mut proposed = order.clone();
        current.sort();
        proposed.sort();
        if current != proposed {
            return false;
        }
        if let Some(node) = self.element_mut(parent) {
            node.children = order;
        }
        true
    }

    /// Pre-order walk over the descendants of `root`, excluding `root`.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// `document.getElementById`: only connected elements are found.
    pub fn get_element_by_id(&self, dom_id: &str) -> Option<ElementId> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .find(|id| self.element(*id).and_then(Element::dom_id) == Some(dom_id))
    }

    /// First descendant of `root` carrying `class`.
    pub fn query_class(&self, root: ElementId, class: &str) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.has_class(*id, class))
    }

    /// All descendants of `root` carrying `class`, in document order.
    pub fn query_class_all(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// First descendant of `root` with the given tag name.
    pub fn query_tag(&self, root: ElementId, tag: &str) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.element(*id).map(Element::tag) == Some(tag))
    }

    /// All descendants of `root` that carry the attribute `name`.
    pub fn query_attribute_all(&self, root: ElementId, name: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.attribute(*id, name).is_some())
            .collect()
    }

    /// Nearest inclusive ancestor carrying `class`.
    pub fn closest(&self, id: ElementId, class: &str) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.element(candidate).and_then(Element::parent);
        }
        None
    }

    // ------------------------------------------------------------------
    // Classes, text, attributes, style
    // ------------------------------------------------------------------

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        if let Some(node) = self.element_mut(id) {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        if let Some(node) = self.element_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(Element::text)
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(node) = self.element_mut(id) {
            node.text = text.into();
        }
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attribute(name))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.element_mut(id) {
            node.attributes.insert(name.to_string(), value.into());
        }
    }

    /// Reads `data-<key>` on the element.
    pub fn data(&self, id: ElementId, key: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.data(key))
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style(property))
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: impl Into<String>) {
        if let Some(node) = self.element_mut(id) {
            node.style.insert(property.to_string(), value.into());
        }
    }

    /// Toggle `display: none` / `display: block`.
    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        self.set_style(id, "display", if hidden { "none" } else { "block" });
    }

    pub fn is_hidden(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(Element::is_hidden)
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(node) = self.element_mut(id) {
            node.disabled = disabled;
        }
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(Element::is_disabled)
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    pub fn rect(&self, id: ElementId) -> Rect {
        self.element(id).map(Element::rect).unwrap_or_default()
    }

    /// Layout is computed by the host; it reports boxes back through here.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(node) = self.slot_element_mut(id) {
            node.rect = rect;
        }
    }

    /// Read a layout property, forcing a flush (`offsetWidth`).
    ///
    /// Removing an animation class, flushing, and re-adding it makes the
    /// renderer treat the re-added class as a fresh animation.
    pub fn force_layout(&mut self, id: ElementId) -> f64 {
        self.layout_flushes += 1;
        self.generation += 1;
        self.rect(id).width
    }

    /// Remove `class`, flush layout, then add it back.
    pub fn restart_animation(&mut self, id: ElementId, class: &str) {
        self.remove_class(id, class);
        self.force_layout(id);
        self.add_class(id, class);
    }

    // ------------------------------------------------------------------
    // Once-listeners
    // ------------------------------------------------------------------

    /// Register a listener that runs once, the next time `event` reaches
    /// `target`, and then deregisters itself.
    ///
    /// An identical listener that is still pending is not registered twice,
    /// so repeated interactions never accumulate handlers. Returns whether a
    /// new listener was added.
    pub fn listen_once(&mut self, target: ElementId, event: DomEvent, action: ListenerAction) -> bool {
        let listener = OnceListener {
            target,
            event,
            action,
        };
        if self.listeners.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Pending once-listeners for `(target, event)`.
    pub fn pending_listeners(&self, target: ElementId, event: DomEvent) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.event == event)
            .count()
    }

    /// Deliver `event` to `target`, running and removing its once-listeners.
    /// Returns how many listeners ran.
    pub fn dispatch(&mut self, target: ElementId, event: DomEvent) -> usize {
        let (fired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.listeners)
            .into_iter()
            .partition(|l| l.target == target && l.event == event);
        self.listeners = kept;

        for listener in &fired {
            match &listener.action {
                ListenerAction::RemoveClass { element, class } => {
                    self.remove_class(*element, class);
                }
            }
        }
        fired.len()
    }
}
