//! Paints the interaction document as Dioxus elements.
//!
//! Every node reports clicks (innermost target only), pointer enter/leave and
//! animation end through one callback. Pointer enter/leave are the
//! non-bubbling kind, so each element hears only its own.

use cheerpaw_core::{Document, DomEvent, ElementId, Interactions};
use dioxus::prelude::*;

use super::MountedControls;

/// What one element looks like at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub tag: String,
    pub dom_id: Option<String>,
    pub class: String,
    pub style: String,
    pub text: String,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub href: Option<String>,
    pub aria_label: Option<String>,
    pub disabled: bool,
    pub children: Vec<ElementId>,
}

impl NodeView {
    pub fn capture(doc: &Document, id: ElementId) -> Option<Self> {
        let el = doc.element(id)?;
        let attr = |name: &str| el.attribute(name).map(str::to_string);
        Some(Self {
            tag: el.tag().to_string(),
            dom_id: el.dom_id().map(str::to_string),
            class: el.class_attr(),
            style: el.style_attr(),
            text: el.text().to_string(),
            src: attr("src"),
            alt: attr("alt"),
            href: attr("href"),
            aria_label: attr("aria-label"),
            disabled: el.is_disabled(),
            children: el.children().to_vec(),
        })
    }
}

#[derive(Clone, PartialEq, Props)]
pub struct DomViewProps {
    pub interactions: Signal<Interactions>,
    pub on_event: EventHandler<(ElementId, DomEvent)>,
}

/// The whole document, from the body down.
#[component]
pub fn DomView(props: DomViewProps) -> Element {
    let body = props.interactions.read().page().document().body();
    rsx! {
        DomNode { id: body, interactions: props.interactions, on_event: props.on_event }
    }
}

#[derive(Clone, PartialEq, Props)]
pub struct DomNodeProps {
    pub id: ElementId,
    pub interactions: Signal<Interactions>,
    pub on_event: EventHandler<(ElementId, DomEvent)>,
}

macro_rules! plain_element {
    ($tag:ident, $dom_id:expr, $class:expr, $style:expr, $handlers:expr, $content:expr) => {{
        let (click, enter, leave, animation_end) = $handlers;
        rsx! {
            $tag {
                id: $dom_id,
                class: $class,
                style: $style,
                onclick: click,
                onmouseenter: enter,
                onmouseleave: leave,
                onanimationend: animation_end,
                {$content}
            }
        }
    }};
}

#[component]
pub fn DomNode(props: DomNodeProps) -> Element {
    let controls = try_use_context::<MountedControls>();
    let Some(view) = NodeView::capture(props.interactions.read().page().document(), props.id) else {
        return rsx! {};
    };

    let id = props.id;
    let on_event = props.on_event;
    let interactions = props.interactions;

    let click = move |evt: MouseEvent| {
        evt.prevent_default();
        evt.stop_propagation();
        on_event.call((id, DomEvent::Click));
    };
    let enter = move |_: MouseEvent| on_event.call((id, DomEvent::PointerEnter));
    let leave = move |_: MouseEvent| on_event.call((id, DomEvent::PointerLeave));
    let animation_end = move |evt: AnimationEvent| {
        evt.stop_propagation();
        on_event.call((id, DomEvent::AnimationEnd));
    };
    let handlers = (click, enter, leave, animation_end);
    let mounted = move |evt: MountedEvent| {
        if let Some(controls) = controls {
            controls.insert(id, evt.data());
        }
    };

    let NodeView {
        tag,
        dom_id,
        class,
        style,
        text,
        src,
        alt,
        href,
        aria_label,
        disabled,
        children,
    } = view;

    let content = rsx! {
        "{text}"
        for child in children {
            DomNode { key: "{child}", id: child, interactions, on_event }
        }
    };

    match tag.as_str() {
        "img" => rsx! {
            img {
                id: dom_id,
                class: "{class}",
                style: "{style}",
                src,
                alt,
                onclick: click,
                onmouseenter: enter,
                onmouseleave: leave,
                onanimationend: animation_end,
            }
        },
        "button" => rsx! {
            button {
                id: dom_id,
                class: "{class}",
                style: "{style}",
                r#type: "button",
                disabled,
                "aria-label": aria_label,
                onmounted: mounted,
                onclick: click,
                onmouseenter: enter,
                onmouseleave: leave,
                onanimationend: animation_end,
                {content}
            }
        },
        "a" => rsx! {
            a {
                id: dom_id,
                class: "{class}",
                style: "{style}",
                href,
                onclick: click,
                onmouseenter: enter,
                onmouseleave: leave,
                onanimationend: animation_end,
                {content}
            }
        },
        "span" => plain_element!(span, dom_id, class, style, handlers, content),
        "h1" => plain_element!(h1, dom_id, class, style, handlers, content),
        "h2" => plain_element!(h2, dom_id, class, style, handlers, content),
        "h3" => plain_element!(h3, dom_id, class, style, handlers, content),
        "p" => plain_element!(p, dom_id, class, style, handlers, content),
        "ul" => plain_element!(ul, dom_id, class, style, handlers, content),
        "li" => plain_element!(li, dom_id, class, style, handlers, content),
        "header" => plain_element!(header, dom_id, class, style, handlers, content),
        "main" => plain_element!(main, dom_id, class, style, handlers, content),
        "section" => plain_element!(section, dom_id, class, style, handlers, content),
        "form" => plain_element!(form, dom_id, class, style, handlers, content),
        _ => plain_element!(div, dom_id, class, style, handlers, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheerpaw_core::ElementBuilder;

    #[test]
    fn test_capture_reads_render_attributes() {
        let mut doc = Document::new();
        let button = doc.build(
            doc.body(),
            ElementBuilder::new("button")
                .id("okConfirmBtn")
                .class("btn primary")
                .attr("aria-label", "Buy")
                .style("display", "none")
                .text("Buy")
                .disabled(true),
        );

        let view = NodeView::capture(&doc, button).unwrap();
        assert_eq!(view.tag, "button");
        assert_eq!(view.dom_id.as_deref(), Some("okConfirmBtn"));
        assert_eq!(view.class, "btn primary");
        assert_eq!(view.style, "display: none");
        assert_eq!(view.aria_label.as_deref(), Some("Buy"));
        assert!(view.disabled);
        assert!(view.children.is_empty());
    }

    #[test]
    fn test_capture_lists_children_in_order() {
        let mut doc = Document::new();
        let list = doc.build(
            doc.body(),
            ElementBuilder::new("ul").children((0..3).map(|i| ElementBuilder::new("li").text(i.to_string()))),
        );
        let view = NodeView::capture(&doc, list).unwrap();
        assert_eq!(view.children, doc.children(list));
    }
}
