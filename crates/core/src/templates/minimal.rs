//! Minimal layout: centered title, round portrait, details footer.

use super::{clip_path, css_rgb, photo, rect, text, wrap_text, TextStyle};
use super::{DESIGN_HEIGHT, DESIGN_WIDTH};
use crate::model::PosterData;
use crate::view::Element;

const PAD: f32 = 48.0;
const TOP_BAR: f32 = 16.0;
const FOOTER_HEIGHT: f32 = 120.0;
const PORTRAIT: f32 = 192.0;
const RING: f32 = 8.0;

const TITLE_LINE: f32 = 44.0;
const BIO_LINE: f32 = 22.0;

pub(super) fn render(data: &PosterData) -> Vec<Element> {
    let theme = css_rgb(data.theme_rgb());
    let center = DESIGN_WIDTH / 2.0;

    let title_style = TextStyle::new(36.0, 900, "#1e293b").anchor("middle").tracking(-0.5);
    let bio_style = TextStyle::new(14.0, 400, "#1e293b").anchor("middle");
    let title_lines = wrap_text(&data.title.to_uppercase(), title_style.size, 600.0);
    let bio_lines = wrap_text(&data.speaker_bio, bio_style.size, 448.0);

    // Stack height, used to center the block between the bar and the footer.
    let stack = title_lines.len() as f32 * TITLE_LINE
        + 32.0
        + PORTRAIT
        + 24.0
        + 32.0
        + 28.0
        + 48.0
        + bio_lines.len() as f32 * BIO_LINE;
    let available = DESIGN_HEIGHT - TOP_BAR - FOOTER_HEIGHT;
    let mut y = TOP_BAR + ((available - stack) / 2.0).max(PAD);

    let portrait_cx = center;
    let mut out = vec![
        rect(0.0, 0.0, DESIGN_WIDTH, DESIGN_HEIGHT, "#ffffff"),
        rect(0.0, 0.0, DESIGN_WIDTH, TOP_BAR, &theme),
    ];

    for line in &title_lines {
        y += TITLE_LINE;
        out.push(text(center, y - 8.0, title_style, line));
    }
    y += 32.0;

    let portrait_cy = y + PORTRAIT / 2.0;
    out.push(
        Element::new("defs").child(clip_path(
            "portrait-clip",
            Element::new("circle")
                .attr("cx", portrait_cx)
                .attr("cy", portrait_cy)
                .attr("r", PORTRAIT / 2.0 - RING),
        )),
    );
    out.push(photo(
        &data.speaker_photo,
        portrait_cx - PORTRAIT / 2.0,
        y,
        PORTRAIT,
        PORTRAIT,
        "portrait-clip",
    ));
    out.push(
        Element::new("circle")
            .attr("cx", portrait_cx)
            .attr("cy", portrait_cy)
            .attr("r", PORTRAIT / 2.0 - RING / 2.0)
            .attr("fill", "none")
            .attr("stroke", &theme)
            .attr("stroke-width", RING),
    );
    y += PORTRAIT + 24.0;

    y += 32.0;
    out.push(text(
        center,
        y - 6.0,
        TextStyle::new(24.0, 700, "#1e293b").anchor("middle"),
        &data.speaker_name,
    ));
    y += 28.0;
    out.push(text(
        center,
        y - 6.0,
        TextStyle::new(18.0, 400, "#1e293b").anchor("middle").italic().opacity(0.7),
        &data.speaker_title,
    ));
    y += 48.0;

    for line in &bio_lines {
        y += BIO_LINE;
        out.push(text(center, y - 6.0, bio_style, line));
    }

    out.extend(footer(data));
    out
}

fn footer(data: &PosterData) -> Vec<Element> {
    let rule_y = DESIGN_HEIGHT - FOOTER_HEIGHT;
    let style = TextStyle::new(12.0, 700, "#1e293b").tracking(3.0).opacity(0.8);
    let right = DESIGN_WIDTH - PAD;

    vec![
        rect(PAD, rule_y, DESIGN_WIDTH - 2.0 * PAD, 1.0, "#e2e8f0"),
        text(PAD, rule_y + 40.0, style, &data.event_date.to_uppercase()),
        text(PAD, rule_y + 62.0, style, &data.time.to_uppercase()),
        text(right, rule_y + 62.0, style.anchor("end"), &data.location.to_uppercase()),
    ]
}
