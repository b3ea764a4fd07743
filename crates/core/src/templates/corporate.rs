//! Corporate layout: dark hero over a blurred photo, two-column body.

use super::{clip_path, css_rgb, paragraph, photo, rect, text, wrap_text, TextStyle};
use super::{DESIGN_HEIGHT, DESIGN_WIDTH};
use crate::model::PosterData;
use crate::view::Element;

const PAD: f32 = 40.0;
const GAP: f32 = 32.0;
const HERO_HEIGHT: f32 = DESIGN_HEIGHT * 0.4;
const LEFT_WIDTH: f32 = (DESIGN_WIDTH - 2.0 * PAD - GAP) / 3.0;
const RIGHT_X: f32 = PAD + LEFT_WIDTH + GAP;
const RIGHT_WIDTH: f32 = DESIGN_WIDTH - PAD - RIGHT_X;

pub(super) fn render(data: &PosterData) -> Vec<Element> {
    let theme = css_rgb(data.theme_rgb());
    let body_y = HERO_HEIGHT + PAD;

    let mut out = vec![
        Element::new("defs")
            .child(clip_path("hero-clip", rect(0.0, 0.0, DESIGN_WIDTH, HERO_HEIGHT, "#000")))
            .child(clip_path(
                "speaker-clip",
                rect(PAD, body_y + 28.0, LEFT_WIDTH, LEFT_WIDTH, "#000").attr("rx", 4),
            ))
            .child(
                Element::new("filter")
                    .attr("id", "hero-blur")
                    .child(Element::new("feGaussianBlur").attr("stdDeviation", 4)),
            ),
        rect(0.0, 0.0, DESIGN_WIDTH, DESIGN_HEIGHT, "#f8fafc"),
        hero(data, &theme),
    ];

    out.extend(speaker_column(data, body_y));
    out.extend(agenda_column(data, &theme, body_y));
    out
}

fn hero(data: &PosterData, theme: &str) -> Element {
    let mut group = Element::new("g").attr("clip-path", "url(#hero-clip)");

    if !data.speaker_photo.trim().is_empty() {
        // Slightly oversized so the blur does not fade the edges.
        group.push(
            Element::new("image")
                .attr("href", &data.speaker_photo)
                .attr("x", -DESIGN_WIDTH * 0.05)
                .attr("y", -HERO_HEIGHT * 0.05)
                .attr("width", DESIGN_WIDTH * 1.1)
                .attr("height", HERO_HEIGHT * 1.1)
                .attr("preserveAspectRatio", "xMidYMid slice")
                .attr("filter", "url(#hero-blur)"),
        );
    }
    group.push(rect(0.0, 0.0, DESIGN_WIDTH, HERO_HEIGHT, "#0f172a").attr("fill-opacity", 0.9));

    let center = DESIGN_WIDTH / 2.0;
    let title_style = TextStyle::new(30.0, 900, "#ffffff").anchor("middle").tracking(-0.5);
    let lines = wrap_text(&data.title.to_uppercase(), title_style.size, DESIGN_WIDTH - 3.0 * PAD);

    let badge_height = 24.0;
    let badge_y = HERO_HEIGHT - PAD - badge_height;
    let first = badge_y - 20.0 - (lines.len().saturating_sub(1)) as f32 * 32.0;
    for (i, line) in lines.iter().enumerate() {
        group.push(text(center, first + i as f32 * 32.0, title_style, line));
    }

    let badge_width = 150.0;
    group.push(
        rect(center - badge_width / 2.0, badge_y, badge_width, badge_height, theme).attr("rx", 4),
    );
    group.push(text(
        center,
        badge_y + 16.5,
        TextStyle::new(11.0, 700, "#ffffff").anchor("middle").tracking(2.5),
        "SPECIAL SESSION",
    ));
    group
}

fn label(x: f32, y: f32, content: &str) -> Element {
    text(x, y, TextStyle::new(12.0, 900, "#94a3b8").tracking(2.0), content)
}

fn speaker_column(data: &PosterData, body_y: f32) -> Vec<Element> {
    let photo_y = body_y + 28.0;
    let mut out = vec![
        label(PAD, body_y + 12.0, "SPEAKER"),
        photo(&data.speaker_photo, PAD, photo_y, LEFT_WIDTH, LEFT_WIDTH, "speaker-clip"),
    ];

    let (name, name_end) = paragraph(
        PAD,
        photo_y + LEFT_WIDTH + 32.0,
        LEFT_WIDTH,
        22.0,
        TextStyle::new(18.0, 700, "#0f172a"),
        &data.speaker_name,
    );
    out.extend(name);

    let (title, title_end) = paragraph(
        PAD,
        name_end + 20.0,
        LEFT_WIDTH,
        16.0,
        TextStyle::new(12.0, 500, "#64748b"),
        &data.speaker_title,
    );
    out.extend(title);

    let (bio, _) = paragraph(
        PAD,
        title_end + 40.0,
        LEFT_WIDTH,
        18.0,
        TextStyle::new(12.0, 400, "#475569").italic(),
        &data.speaker_bio,
    );
    out.extend(bio);
    out
}

fn agenda_column(data: &PosterData, theme: &str, body_y: f32) -> Vec<Element> {
    let mut out = vec![label(RIGHT_X, body_y + 12.0, "AGENDA")];
    let item_style = TextStyle::new(14.0, 600, "#1e293b");

    let mut y = body_y + 56.0;
    for item in &data.agenda {
        let (lines, last) = paragraph(RIGHT_X + 16.0, y, RIGHT_WIDTH - 16.0, 20.0, item_style, item);
        let bar_height = (last - y) + 24.0;
        out.push(rect(RIGHT_X, y - 17.0, 2.0, bar_height, theme));
        out.extend(lines);
        y = last + 44.0;
    }

    let footer_y = DESIGN_HEIGHT - PAD - 40.0;
    let half = RIGHT_WIDTH / 2.0;
    let value = TextStyle::new(12.0, 600, "#0f172a");
    out.push(label(RIGHT_X, footer_y, "WHEN"));
    let (when, _) = paragraph(
        RIGHT_X,
        footer_y + 22.0,
        half - 16.0,
        16.0,
        value,
        &format!("{} @ {}", data.event_date, data.time),
    );
    out.extend(when);
    out.push(label(RIGHT_X + half, footer_y, "WHERE"));
    let (where_, _) = paragraph(RIGHT_X + half, footer_y + 22.0, half - 16.0, 16.0, value, &data.location);
    out.extend(where_);
    out
}
