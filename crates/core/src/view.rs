//! Retained view tree produced by the templates.
//!
//! A [`RenderedView`] stands in for an on-screen element: an SVG-vocabulary
//! element tree plus the layout box it was measured at. The rasterizer only
//! ever consumes rendered views, never [`PosterData`](crate::PosterData)
//! directly.

use std::fmt::Display;

/// Node in the view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Element(Element),
    Text(String),
}

/// Element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<ViewNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: &str, value: impl Display) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl Display) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(n, _)| n == name)?;
        Some(self.attrs.remove(idx).1)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(ViewNode::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(ViewNode::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ViewNode::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(ViewNode::Element(child));
    }

    /// Concatenated text content of this subtree.
    #[cfg(test)]
    pub(crate) fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Depth-first search for elements with the given tag.
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        find_all_into(self, tag, &mut found);
        found
    }
}

#[cfg(test)]
fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            ViewNode::Text(t) => out.push_str(t),
            ViewNode::Element(e) => collect_text(e, out),
        }
    }
}

fn find_all_into<'a>(element: &'a Element, tag: &str, found: &mut Vec<&'a Element>) {
    if element.tag == tag {
        found.push(element);
    }
    for child in &element.children {
        if let ViewNode::Element(e) = child {
            find_all_into(e, tag, found);
        }
    }
}

/// Measured size of a rendered element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub width: f32,
    pub height: f32,
}

impl LayoutBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Layout has settled to a drawable, non-empty size.
    pub fn is_settled(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An element tree together with its measured layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub root: Element,
    pub layout: LayoutBox,
}

impl RenderedView {
    pub fn new(root: Element, layout: LayoutBox) -> Self {
        Self { root, layout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_replaces_existing() {
        let el = Element::new("rect").attr("width", 10).attr("width", "100%");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.get_attr("width"), Some("100%"));
    }

    #[test]
    fn test_remove_attr() {
        let mut el = Element::new("g").attr("transform", "scale(2)");
        assert_eq!(el.remove_attr("transform").as_deref(), Some("scale(2)"));
        assert_eq!(el.remove_attr("transform"), None);
    }

    #[test]
    fn test_text_content_and_find_all() {
        let el = Element::new("g")
            .child(Element::new("text").text("Hello "))
            .child(Element::new("g").child(Element::new("text").text("world")));
        assert_eq!(el.text_content(), "Hello world");
        assert_eq!(el.find_all("text").len(), 2);
    }

    #[test]
    fn test_layout_settled() {
        assert!(LayoutBox::new(794.0, 1123.0).is_settled());
        assert!(!LayoutBox::new(0.0, 1123.0).is_settled());
        assert!(!LayoutBox::new(f32::NAN, 10.0).is_settled());
    }
}
