//! Poster templates.
//!
//! Each [`Template`] variant has one layout module producing SVG elements in
//! a fixed A4 design space (794 x 1123 CSS pixels). [`render`] wraps them in a
//! root element and pairs it with the measured layout of the preview.

mod corporate;
mod minimal;
mod modern;

use crate::model::{PosterData, Template};
use crate::view::{Element, LayoutBox, RenderedView};

/// Design-space width (A4 at 96 DPI).
pub const DESIGN_WIDTH: f32 = 794.0;
/// Design-space height (A4 at 96 DPI).
pub const DESIGN_HEIGHT: f32 = 1123.0;

/// Layout of an unscaled on-screen A4 preview.
pub const A4_PREVIEW: LayoutBox = LayoutBox {
    width: DESIGN_WIDTH,
    height: DESIGN_HEIGHT,
};

const FONT_STACK: &str = "Inter, Helvetica, Arial, sans-serif";

/// Average glyph advance as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.55;

/// Render `data` with its selected template into a view laid out at `layout`.
pub fn render(data: &PosterData, layout: LayoutBox) -> RenderedView {
    let body = match data.template {
        Template::Modern => modern::render(data),
        Template::Corporate => corporate::render(data),
        Template::Minimal => minimal::render(data),
    };

    let root = Element::new("svg")
        .attr("width", "100%")
        .attr("height", "100%")
        .attr("viewBox", format!("0 0 {} {}", DESIGN_WIDTH, DESIGN_HEIGHT))
        .attr("font-family", FONT_STACK)
        .attr("font-size", 16)
        .attr("data-template", data.template)
        .children(body);

    RenderedView::new(root, layout)
}

/// Render at the default A4 preview size.
pub fn render_preview(data: &PosterData) -> RenderedView {
    render(data, A4_PREVIEW)
}

/// Text style shared by the layout helpers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle<'a> {
    pub size: f32,
    pub weight: u16,
    pub fill: &'a str,
    pub italic: bool,
    pub letter_spacing: f32,
    pub anchor: &'a str,
    pub opacity: f32,
}

impl<'a> TextStyle<'a> {
    pub fn new(size: f32, weight: u16, fill: &'a str) -> Self {
        Self {
            size,
            weight,
            fill,
            italic: false,
            letter_spacing: 0.0,
            anchor: "start",
            opacity: 1.0,
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn tracking(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn anchor(mut self, anchor: &'a str) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// One line of text with its baseline at (`x`, `y`).
pub(crate) fn text(x: f32, y: f32, style: TextStyle<'_>, content: &str) -> Element {
    let mut el = Element::new("text")
        .attr("x", x)
        .attr("y", y)
        .attr("font-size", style.size)
        .attr("font-weight", style.weight)
        .attr("fill", style.fill);
    if style.italic {
        el.set_attr("font-style", "italic");
    }
    if style.letter_spacing != 0.0 {
        el.set_attr("letter-spacing", style.letter_spacing);
    }
    if style.anchor != "start" {
        el.set_attr("text-anchor", style.anchor);
    }
    if style.opacity < 1.0 {
        el.set_attr("fill-opacity", style.opacity);
    }
    el.text(content)
}

/// Wrapped paragraph; returns the elements and the baseline after the last line.
pub(crate) fn paragraph(
    x: f32,
    y: f32,
    max_width: f32,
    line_height: f32,
    style: TextStyle<'_>,
    content: &str,
) -> (Vec<Element>, f32) {
    let lines = wrap_text(content, style.size, max_width);
    let mut baseline = y;
    let mut elements = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        baseline = y + i as f32 * line_height;
        elements.push(text(x, baseline, style, line));
    }
    (elements, baseline)
}

/// Greedy word wrap using an average glyph width estimate.
///
/// Words longer than a line are kept whole on their own line.
pub fn wrap_text(content: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let max_chars = ((max_width / (font_size * AVG_CHAR_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in content.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub(crate) fn rect(x: f32, y: f32, width: f32, height: f32, fill: &str) -> Element {
    Element::new("rect")
        .attr("x", x)
        .attr("y", y)
        .attr("width", width)
        .attr("height", height)
        .attr("fill", fill)
}

pub(crate) fn css_rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("rgb({},{},{})", r, g, b)
}

/// Speaker photo clipped by `clip_id`, or a neutral placeholder when unset.
pub(crate) fn photo(
    href: &str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    clip_id: &str,
) -> Element {
    let clip = format!("url(#{})", clip_id);
    if href.trim().is_empty() {
        return rect(x, y, width, height, "#e2e8f0").attr("clip-path", clip);
    }
    Element::new("image")
        .attr("href", href)
        .attr("x", x)
        .attr("y", y)
        .attr("width", width)
        .attr("height", height)
        .attr("preserveAspectRatio", "xMidYMid slice")
        .attr("clip-path", clip)
}

/// `<clipPath>` wrapping a single shape.
pub(crate) fn clip_path(id: &str, shape: Element) -> Element {
    Element::new("clipPath").attr("id", id).child(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    fn data_with(template: Template) -> PosterData {
        PosterData {
            template,
            ..PosterData::default()
        }
    }

    #[test]
    fn test_wrap_text_breaks_on_words() {
        // 10px font, 60px line -> 10 chars per line.
        let lines = wrap_text("alpha beta gamma delta", 10.0, 60.0);
        assert_eq!(lines, vec!["alpha beta", "gamma", "delta"]);
    }

    #[test]
    fn test_wrap_text_keeps_long_words() {
        let lines = wrap_text("supercalifragilistic ok", 10.0, 30.0);
        assert_eq!(lines, vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("   ", 12.0, 100.0).is_empty());
    }

    #[test]
    fn test_render_every_template() {
        for template in Template::ALL {
            let view = render_preview(&data_with(template));
            assert_eq!(view.root.tag, "svg");
            assert_eq!(view.root.get_attr("data-template"), Some(template.as_str()));
            assert_eq!(view.layout, A4_PREVIEW);
            assert!(!view.root.children.is_empty(), "{} rendered nothing", template);
        }
    }

    #[test]
    fn test_templates_render_agenda_in_order() {
        for template in [Template::Modern, Template::Corporate] {
            let view = render_preview(&data_with(template));
            let content = view.root.text_content();
            let first = content.find("09:00 - Welcome").unwrap();
            let last = content.find("13:00 - Q&A Session").unwrap();
            assert!(first < last, "{}", template);
        }
    }

    #[test]
    fn test_templates_use_theme_color() {
        let mut data = data_with(Template::Corporate);
        data.theme_color = "#059669".to_string();
        for template in Template::ALL {
            data.template = template;
            let markup = Snapshot::capture(&render_preview(&data)).markup;
            assert!(markup.contains("rgb(5,150,105)"), "{}", template);
        }
    }

    #[test]
    fn test_templates_show_speaker_and_location() {
        for template in Template::ALL {
            let content = render_preview(&data_with(template)).root.text_content();
            assert!(content.contains("Dr. Jane Smith"), "{}", template);
            assert!(content.to_lowercase().contains("tech hub arena"), "{}", template);
        }
    }

    #[test]
    fn test_empty_agenda_and_photo_render() {
        let mut data = PosterData::default();
        data.agenda.clear();
        data.speaker_photo.clear();
        for template in Template::ALL {
            data.template = template;
            let view = render_preview(&data);
            assert!(view.root.find_all("image").is_empty(), "{}", template);
        }
    }

    #[test]
    fn test_render_respects_measured_layout() {
        let view = render(&PosterData::default(), LayoutBox::new(397.0, 561.5));
        let snap = Snapshot::capture(&view);
        assert_eq!(snap.width, 397.0);
        assert!(snap.markup.contains("width=\"397\""));
    }
}
