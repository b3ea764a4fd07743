//! Poster data model, sync settings and form edits.

use crate::error::{PosterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named theme color offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub name: &'static str,
    pub hex: &'static str,
}

/// Theme color presets.
pub const THEME_PRESETS: &[ThemePreset] = &[
    ThemePreset { name: "Default Blue", hex: "#2563eb" },
    ThemePreset { name: "Emerald", hex: "#059669" },
    ThemePreset { name: "Rose", hex: "#e11d48" },
    ThemePreset { name: "Indigo", hex: "#4f46e5" },
    ThemePreset { name: "Amber", hex: "#d97706" },
    ThemePreset { name: "Slate", hex: "#334155" },
];

/// Visual layout used to render a poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Modern,
    Corporate,
    Minimal,
}

impl Template {
    /// All templates, in display order.
    pub const ALL: [Template; 3] = [Template::Modern, Template::Corporate, Template::Minimal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Corporate => "corporate",
            Template::Minimal => "minimal",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self> {
        Template::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                PosterError::InvalidInput(format!(
                    "unknown template '{}', expected one of: modern, corporate, minimal",
                    s
                ))
            })
    }
}

/// Everything shown on a poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PosterData {
    pub title: String,
    pub speaker_name: String,
    pub speaker_title: String,
    pub speaker_bio: String,
    /// URL, file path or data URI of the speaker photo.
    pub speaker_photo: String,
    /// Ordered agenda lines; may be empty, duplicates allowed.
    pub agenda: Vec<String>,
    pub time: String,
    pub location: String,
    pub event_date: String,
    /// Accent color as `#RGB` or `#RRGGBB`.
    pub theme_color: String,
    pub template: Template,
}

impl Default for PosterData {
    fn default() -> Self {
        Self {
            title: "Future of Generative AI in Web Design".to_string(),
            speaker_name: "Dr. Jane Smith".to_string(),
            speaker_title: "Lead AI Engineer @ TechCorp".to_string(),
            speaker_bio: "Over 15 years of experience in distributed systems and neural \
                          networks. Previously at Google Brain."
                .to_string(),
            speaker_photo: "https://picsum.photos/400/400".to_string(),
            agenda: vec![
                "09:00 - Welcome & Introduction".to_string(),
                "10:00 - Deep Dive: Transformer Models".to_string(),
                "11:30 - Hands-on Workshop".to_string(),
                "13:00 - Q&A Session".to_string(),
            ],
            time: "09:00 AM - 02:00 PM".to_string(),
            location: "Tech Hub Arena, 4th Floor".to_string(),
            event_date: "2024-12-15".to_string(),
            theme_color: THEME_PRESETS[0].hex.to_string(),
            template: Template::Modern,
        }
    }
}

/// Free-text fields of [`PosterData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterField {
    Title,
    SpeakerName,
    SpeakerTitle,
    SpeakerBio,
    SpeakerPhoto,
    Time,
    Location,
    EventDate,
}

/// A single form edit.
#[derive(Debug, Clone, PartialEq)]
pub enum PosterEdit {
    SetField(PosterField, String),
    SetAgendaItem(usize, String),
    AddAgendaItem,
    RemoveAgendaItem(usize),
    SetThemeColor(String),
    SetTemplate(Template),
}

impl PosterData {
    /// Apply a form edit.
    pub fn apply(&mut self, edit: PosterEdit) -> Result<()> {
        match edit {
            PosterEdit::SetField(field, value) => *self.field_mut(field) = value,
            PosterEdit::SetAgendaItem(index, value) => {
                let len = self.agenda.len();
                let item = self.agenda.get_mut(index).ok_or_else(|| {
                    PosterError::InvalidInput(format!(
                        "agenda index {} out of range (len {})",
                        index, len
                    ))
                })?;
                *item = value;
            }
            PosterEdit::AddAgendaItem => self.agenda.push(String::new()),
            PosterEdit::RemoveAgendaItem(index) => {
                if index >= self.agenda.len() {
                    return Err(PosterError::InvalidInput(format!(
                        "agenda index {} out of range (len {})",
                        index,
                        self.agenda.len()
                    )));
                }
                self.agenda.remove(index);
            }
            PosterEdit::SetThemeColor(hex) => {
                parse_hex_color(&hex).ok_or_else(|| {
                    PosterError::InvalidInput(format!("'{}' is not a hex color", hex))
                })?;
                self.theme_color = hex;
            }
            PosterEdit::SetTemplate(template) => self.template = template,
        }
        Ok(())
    }

    fn field_mut(&mut self, field: PosterField) -> &mut String {
        match field {
            PosterField::Title => &mut self.title,
            PosterField::SpeakerName => &mut self.speaker_name,
            PosterField::SpeakerTitle => &mut self.speaker_title,
            PosterField::SpeakerBio => &mut self.speaker_bio,
            PosterField::SpeakerPhoto => &mut self.speaker_photo,
            PosterField::Time => &mut self.time,
            PosterField::Location => &mut self.location,
            PosterField::EventDate => &mut self.event_date,
        }
    }

    /// Theme color as RGB, falling back to the default preset when unparsable.
    pub fn theme_rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.theme_color)
            .or_else(|| parse_hex_color(THEME_PRESETS[0].hex))
            .unwrap_or((37, 99, 235))
    }
}

/// Parse `#RGB` or `#RRGGBB`.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Credentials for the external note-taking service.
///
/// Sync is attempted only when both fields are non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSyncSettings {
    pub api_key: String,
    pub database_id: String,
}

impl ExternalSyncSettings {
    pub fn new(api_key: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            database_id: database_id.into(),
        }
    }

    /// Both the token and the destination id are present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.database_id.is_empty()
    }
}

/// Progress of the current export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportStatus {
    #[default]
    Idle,
    Generating,
    Syncing,
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poster() {
        let data = PosterData::default();
        assert_eq!(data.speaker_name, "Dr. Jane Smith");
        assert_eq!(data.agenda.len(), 4);
        assert_eq!(data.template, Template::Modern);
        assert_eq!(data.theme_color, "#2563eb");
    }

    #[test]
    fn test_template_from_str() {
        assert_eq!("corporate".parse::<Template>().unwrap(), Template::Corporate);
        assert_eq!("Minimal".parse::<Template>().unwrap(), Template::Minimal);
        assert!("brutalist".parse::<Template>().is_err());
    }

    #[test]
    fn test_template_serde_lowercase() {
        let json = serde_json::to_string(&Template::Corporate).unwrap();
        assert_eq!(json, "\"corporate\"");
        let back: Template = serde_json::from_str("\"minimal\"").unwrap();
        assert_eq!(back, Template::Minimal);
        assert!(serde_json::from_str::<Template>("\"fancy\"").is_err());
    }

    #[test]
    fn test_poster_json_uses_camel_case() {
        let json = serde_json::to_value(PosterData::default()).unwrap();
        assert!(json.get("speakerName").is_some());
        assert!(json.get("eventDate").is_some());
        assert_eq!(json["template"], "modern");
    }

    #[test]
    fn test_apply_set_field() {
        let mut data = PosterData::default();
        data.apply(PosterEdit::SetField(PosterField::Location, "Room 4".to_string()))
            .unwrap();
        assert_eq!(data.location, "Room 4");
    }

    #[test]
    fn test_apply_agenda_edits_preserve_order() {
        let mut data = PosterData::default();
        data.apply(PosterEdit::AddAgendaItem).unwrap();
        assert_eq!(data.agenda.len(), 5);
        assert_eq!(data.agenda[4], "");

        data.apply(PosterEdit::SetAgendaItem(4, "15:00 - Closing".to_string()))
            .unwrap();
        data.apply(PosterEdit::RemoveAgendaItem(0)).unwrap();
        assert_eq!(data.agenda[0], "10:00 - Deep Dive: Transformer Models");
        assert_eq!(data.agenda.last().unwrap(), "15:00 - Closing");
    }

    #[test]
    fn test_apply_agenda_out_of_range() {
        let mut data = PosterData::default();
        assert!(data.apply(PosterEdit::RemoveAgendaItem(10)).is_err());
        assert!(data
            .apply(PosterEdit::SetAgendaItem(10, "x".to_string()))
            .is_err());
        assert_eq!(data.agenda.len(), 4);
    }

    #[test]
    fn test_agenda_allows_duplicates_and_empty() {
        let mut data = PosterData::default();
        data.agenda = vec!["Break".to_string(), "Break".to_string()];
        assert_eq!(data.agenda.len(), 2);
        data.agenda.clear();
        assert!(data.agenda.is_empty());
    }

    #[test]
    fn test_apply_theme_color() {
        let mut data = PosterData::default();
        data.apply(PosterEdit::SetThemeColor("#059669".to_string())).unwrap();
        assert_eq!(data.theme_rgb(), (5, 150, 105));

        let err = data.apply(PosterEdit::SetThemeColor("green".to_string()));
        assert!(err.is_err());
        assert!(data
            .apply(PosterEdit::SetThemeColor("fff".to_string()))
            .is_err());
        assert_eq!(data.theme_color, "#059669");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#e11d48"), Some((225, 29, 72)));
        assert_eq!(parse_hex_color("e11d48"), None);
        assert_eq!(parse_hex_color("##fff"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_theme_rgb_falls_back() {
        let mut data = PosterData::default();
        data.theme_color = "not-a-color".to_string();
        assert_eq!(data.theme_rgb(), (37, 99, 235));
    }

    #[test]
    fn test_presets_parse() {
        for preset in THEME_PRESETS {
            assert!(parse_hex_color(preset.hex).is_some(), "{}", preset.name);
        }
    }

    #[test]
    fn test_sync_settings_both_or_neither() {
        assert!(!ExternalSyncSettings::default().is_configured());
        assert!(!ExternalSyncSettings::new("", "db").is_configured());
        assert!(!ExternalSyncSettings::new("secret_x", "").is_configured());
        assert!(ExternalSyncSettings::new("secret_x", "db").is_configured());
    }
}
