//! Modern layout: colored banner, agenda column and a speaker card.

use super::{clip_path, css_rgb, paragraph, photo, rect, text, TextStyle, DESIGN_HEIGHT, DESIGN_WIDTH};
use crate::model::PosterData;
use crate::view::Element;

const PAD: f32 = 40.0;
const BANNER_HEIGHT: f32 = 256.0;
const LEFT_WIDTH: f32 = 400.0;
const RIGHT_X: f32 = 474.0;
const RIGHT_WIDTH: f32 = 280.0;

pub(super) fn render(data: &PosterData) -> Vec<Element> {
    let theme = css_rgb(data.theme_rgb());
    let mut out = vec![
        Element::new("defs")
            .child(clip_path("banner-clip", rect(0.0, 0.0, DESIGN_WIDTH, BANNER_HEIGHT, "#000")))
            .child(clip_path(
                "photo-clip",
                rect(RIGHT_X, 296.0, RIGHT_WIDTH, 350.0, "#000").attr("rx", 12),
            )),
        rect(0.0, 0.0, DESIGN_WIDTH, DESIGN_HEIGHT, "#ffffff"),
    ];

    out.push(banner(data, &theme));
    out.extend(agenda_column(data, &theme));
    out.extend(speaker_column(data, &theme));
    out.push(rect(0.0, DESIGN_HEIGHT - 8.0, DESIGN_WIDTH, 8.0, &theme));
    out
}

fn banner(data: &PosterData, theme: &str) -> Element {
    let mut group = Element::new("g")
        .attr("clip-path", "url(#banner-clip)")
        .child(rect(0.0, 0.0, DESIGN_WIDTH, BANNER_HEIGHT, theme))
        .child(
            Element::new("circle")
                .attr("cx", DESIGN_WIDTH - 48.0)
                .attr("cy", 48)
                .attr("r", 128)
                .attr("fill", "#ffffff")
                .attr("fill-opacity", 0.1),
        )
        .child(
            Element::new("circle")
                .attr("cx", 16)
                .attr("cy", BANNER_HEIGHT - 16.0)
                .attr("r", 96)
                .attr("fill", "#000000")
                .attr("fill-opacity", 0.1),
        );

    let title_style = TextStyle::new(36.0, 800, "#ffffff");
    let lines = super::wrap_text(&data.title, title_style.size, DESIGN_WIDTH - 2.0 * PAD);
    let meta_baseline = BANNER_HEIGHT - PAD;
    let last_title_baseline = meta_baseline - 34.0;
    let first = last_title_baseline - (lines.len().saturating_sub(1)) as f32 * 42.0;
    for (i, line) in lines.iter().enumerate() {
        group.push(text(PAD, first + i as f32 * 42.0, title_style, line));
    }

    let meta = TextStyle::new(14.0, 500, "#ffffff").opacity(0.9);
    let date_width = data.event_date.chars().count() as f32 * 14.0 * 0.55;
    group.push(text(PAD, meta_baseline, meta, &data.event_date));
    group.push(text(PAD + date_width + 24.0, meta_baseline, meta, &data.time));
    group
}

fn section_label(y: f32, label: &str) -> Element {
    text(
        PAD,
        y,
        TextStyle::new(12.0, 900, "#0f172a").tracking(2.0).opacity(0.3),
        label,
    )
}

fn agenda_column(data: &PosterData, theme: &str) -> Vec<Element> {
    let mut out = vec![section_label(BANNER_HEIGHT + 48.0, "THE AGENDA")];
    let item_style = TextStyle::new(14.0, 500, "#334155");

    let mut y = BANNER_HEIGHT + 84.0;
    for item in &data.agenda {
        out.push(
            Element::new("circle")
                .attr("cx", PAD + 3.0)
                .attr("cy", y - 5.0)
                .attr("r", 3)
                .attr("fill", theme),
        );
        let (lines, last) = paragraph(PAD + 16.0, y, LEFT_WIDTH - 16.0, 20.0, item_style, item);
        out.extend(lines);
        y = last + 32.0;
    }

    let rule_y = y + 8.0;
    out.push(rect(PAD, rule_y, LEFT_WIDTH, 1.0, "#f1f5f9"));
    out.push(section_label(rule_y + 40.0, "LOCATION"));
    out.push(
        Element::new("circle")
            .attr("cx", PAD + 8.0)
            .attr("cy", rule_y + 70.0)
            .attr("r", 6)
            .attr("fill", "none")
            .attr("stroke", theme)
            .attr("stroke-width", 2.5),
    );
    let (location, _) = paragraph(
        PAD + 24.0,
        rule_y + 75.0,
        LEFT_WIDTH - 24.0,
        20.0,
        TextStyle::new(14.0, 600, "#1e293b"),
        &data.location,
    );
    out.extend(location);
    out
}

fn speaker_column(data: &PosterData, theme: &str) -> Vec<Element> {
    let photo_y = 296.0;
    let photo_h = 350.0;
    let mut out = vec![
        rect(RIGHT_X - 8.0, photo_y - 8.0, RIGHT_WIDTH + 16.0, photo_h + 16.0, theme)
            .attr("rx", 16)
            .attr("fill-opacity", 0.2),
        photo(&data.speaker_photo, RIGHT_X, photo_y, RIGHT_WIDTH, photo_h, "photo-clip"),
    ];

    let name_y = photo_y + photo_h + 48.0;
    let (name, name_end) = paragraph(
        RIGHT_X,
        name_y,
        RIGHT_WIDTH,
        26.0,
        TextStyle::new(24.0, 900, theme),
        &data.speaker_name,
    );
    out.extend(name);

    let (title, title_end) = paragraph(
        RIGHT_X,
        name_end + 26.0,
        RIGHT_WIDTH,
        18.0,
        TextStyle::new(14.0, 700, "#64748b"),
        &data.speaker_title,
    );
    out.extend(title);

    let rule_y = title_end + 16.0;
    out.push(rect(RIGHT_X, rule_y, RIGHT_WIDTH, 1.0, "#f1f5f9"));
    let (bio, _) = paragraph(
        RIGHT_X,
        rule_y + 24.0,
        RIGHT_WIDTH,
        18.0,
        TextStyle::new(12.0, 400, "#475569"),
        &data.speaker_bio,
    );
    out.extend(bio);
    out
}
