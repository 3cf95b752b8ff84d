//! Declarative construction of element subtrees.

use super::{Document, ElementId, Rect};

/// Builder for an element and its subtree.
///
/// ```ignore
/// let card = ElementBuilder::new("div")
///     .class("animal-card")
///     .child(ElementBuilder::new("span").class("point").text("4"));
/// let id = doc.build(doc.body(), card);
/// ```
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    text: Option<String>,
    disabled: bool,
    rect: Option<Rect>,
    children: Vec<ElementBuilder>,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            style: Vec::new(),
            text: None,
            disabled: false,
            rect: None,
            children: Vec::new(),
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Add one or more space-separated classes.
    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set `data-<key>`.
    pub fn data(self, key: &str, value: impl Into<String>) -> Self {
        self.attr(format!("data-{}", key), value)
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    /// Start with `display: none`.
    pub fn hidden(self) -> Self {
        self.style("display", "none")
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children.extend(children);
        self
    }
}

impl Document {
    /// Materialize `builder` and append it under `parent`.
    pub fn build(&mut self, parent: ElementId, builder: ElementBuilder) -> ElementId {
        let id = self.create_element(&builder.tag);
        for class in &builder.classes {
            self.add_class(id, class);
        }
        for (name, value) in builder.attributes {
            self.set_attribute(id, &name, value);
        }
        for (property, value) in builder.style {
            self.set_style(id, &property, value);
        }
        if let Some(text) = builder.text {
            self.set_text(id, text);
        }
        if builder.disabled {
            self.set_disabled(id, true);
        }
        if let Some(rect) = builder.rect {
            self.set_rect(id, rect);
        }
        self.append_child(parent, id);
        for child in builder.children {
            self.build(id, child);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_subtree() {
        let mut doc = Document::new();
        let card = doc.build(
            doc.body(),
            ElementBuilder::new("div")
                .class("animal-card is-new")
                .child(ElementBuilder::new("span").class("point").text("4"))
                .child(
                    ElementBuilder::new("button")
                        .class("push-btn")
                        .data("id", "otter-1"),
                ),
        );

        let point = doc.query_class(card, "point").unwrap();
        assert_eq!(doc.text(point), Some("4"));

        let button = doc.query_class(card, "push-btn").unwrap();
        assert_eq!(doc.data(button, "id"), Some("otter-1"));
        assert!(doc.has_class(card, "is-new"));
        assert_eq!(doc.children(card), &[point, button]);
    }

    #[test]
    fn test_hidden_builder() {
        let mut doc = Document::new();
        let modal = doc.build(doc.body(), ElementBuilder::new("div").id("confirmModal").hidden());
        assert!(doc.is_hidden(modal));
        assert_eq!(doc.get_element_by_id("confirmModal"), Some(modal));
    }
}
