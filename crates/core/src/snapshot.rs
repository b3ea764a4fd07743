//! Serialization of a rendered view into self-contained markup.

use crate::view::{Element, RenderedView, ViewNode};
use tracing::debug;

/// Frozen, self-contained copy of a rendered view.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Serialized subtree.
    pub markup: String,
    /// Measured width of the source element, in pixels.
    pub width: f32,
    /// Measured height of the source element, in pixels.
    pub height: f32,
}

impl Snapshot {
    /// Capture the current state of a rendered view.
    ///
    /// Works on a clone: the root gets explicit pixel `width`/`height` taken
    /// from the measured layout, and any root `transform` is dropped. The
    /// view itself is left untouched.
    pub fn capture(view: &RenderedView) -> Self {
        let mut root = view.root.clone();
        root.set_attr("width", format_px(view.layout.width));
        root.set_attr("height", format_px(view.layout.height));
        root.remove_attr("transform");

        let mut markup = String::with_capacity(4096);
        write_element(&root, &mut markup);

        debug!(
            "Captured {}x{} snapshot ({} bytes of markup)",
            view.layout.width,
            view.layout.height,
            markup.len()
        );

        Self {
            markup,
            width: view.layout.width,
            height: view.layout.height,
        }
    }

    /// Wrap already-serialized markup measured at `width` x `height`.
    pub fn from_markup(markup: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            markup: markup.into(),
            width,
            height,
        }
    }
}

fn format_px(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            ViewNode::Element(e) => write_element(e, out),
            ViewNode::Text(t) => escape_into(t, false, out),
        }
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

/// XML-escape `text`; quotes are only escaped inside attribute values.
fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&apos;"),
            // Not representable in XML 1.0.
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::LayoutBox;

    fn sample_view() -> RenderedView {
        let root = Element::new("svg")
            .attr("width", "100%")
            .attr("height", "auto")
            .attr("transform", "scale(0.5)")
            .child(Element::new("text").attr("x", 10).text("Q&A <live>"));
        RenderedView::new(root, LayoutBox::new(397.0, 561.5))
    }

    #[test]
    fn test_capture_uses_measured_geometry() {
        let snap = Snapshot::capture(&sample_view());
        assert!(snap.markup.starts_with("<svg width=\"397\" height=\"561.50\""));
        assert!(!snap.markup.contains("100%"));
        assert_eq!(snap.width, 397.0);
        assert_eq!(snap.height, 561.5);
    }

    #[test]
    fn test_capture_clears_root_transform() {
        let snap = Snapshot::capture(&sample_view());
        assert!(!snap.markup.contains("transform"));
    }

    #[test]
    fn test_capture_leaves_original_untouched() {
        let view = sample_view();
        let before = view.clone();
        let _ = Snapshot::capture(&view);
        assert_eq!(view, before);
        assert_eq!(view.root.get_attr("width"), Some("100%"));
    }

    #[test]
    fn test_capture_escapes_text_and_attributes() {
        let root = Element::new("svg")
            .child(Element::new("image").attr("href", "a.png?x=1&y=\"2\""))
            .child(Element::new("text").text("Tom & \"Jerry\" <3\u{7}"));
        let snap = Snapshot::capture(&RenderedView::new(root, LayoutBox::new(10.0, 10.0)));
        assert!(snap.markup.contains("href=\"a.png?x=1&amp;y=&quot;2&quot;\""));
        assert!(snap.markup.contains(">Tom &amp; \"Jerry\" &lt;3</text>"));
    }

    #[test]
    fn test_capture_self_closes_empty_elements() {
        let root = Element::new("svg").child(Element::new("rect").attr("x", 0));
        let snap = Snapshot::capture(&RenderedView::new(root, LayoutBox::new(5.0, 5.0)));
        assert_eq!(
            snap.markup,
            "<svg width=\"5\" height=\"5\"><rect x=\"0\"/></svg>"
        );
    }
}
