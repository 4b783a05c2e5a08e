//! Semantic color slots, theme palettes, and slot resolution.
//!
//! Widgets never name a concrete color. They ask a [`ThemeColors`] for a
//! [`ColorSlot`], and the theme answers with a terminal color. A slot the
//! active theme does not define falls back to the neutral gray theme, so
//! every lookup yields some color.

pub mod presets;

use std::collections::BTreeMap;
use std::fmt;

use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};

pub use presets::{all_themes, get_theme_by_name, DEFAULT_THEME};

/// A named color role read by style functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSlot {
    Text,
    Muted,
    Label,
    Separator,
    Model,
    Duration,
    Cost,
    LinesAdded,
    LinesRemoved,
    Branch,
    Changes,
    Tag,
    ContextLow,
    ContextMedium,
    ContextHigh,
    CacheHigh,
    CacheMedium,
    CacheLow,
    CacheRead,
    CacheWrite,
    ToolRunning,
    ToolCompleted,
    ToolName,
    ToolCount,
    ConfigCount,
    ConfigLabel,
    SystemCpu,
    SystemMemory,
    SystemHigh,
}

impl ColorSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSlot::Text => "text",
            ColorSlot::Muted => "muted",
            ColorSlot::Label => "label",
            ColorSlot::Separator => "separator",
            ColorSlot::Model => "model",
            ColorSlot::Duration => "duration",
            ColorSlot::Cost => "cost",
            ColorSlot::LinesAdded => "lines_added",
            ColorSlot::LinesRemoved => "lines_removed",
            ColorSlot::Branch => "branch",
            ColorSlot::Changes => "changes",
            ColorSlot::Tag => "tag",
            ColorSlot::ContextLow => "context_low",
            ColorSlot::ContextMedium => "context_medium",
            ColorSlot::ContextHigh => "context_high",
            ColorSlot::CacheHigh => "cache_high",
            ColorSlot::CacheMedium => "cache_medium",
            ColorSlot::CacheLow => "cache_low",
            ColorSlot::CacheRead => "cache_read",
            ColorSlot::CacheWrite => "cache_write",
            ColorSlot::ToolRunning => "tool_running",
            ColorSlot::ToolCompleted => "tool_completed",
            ColorSlot::ToolName => "tool_name",
            ColorSlot::ToolCount => "tool_count",
            ColorSlot::ConfigCount => "config_count",
            ColorSlot::ConfigLabel => "config_label",
            ColorSlot::SystemCpu => "system_cpu",
            ColorSlot::SystemMemory => "system_memory",
            ColorSlot::SystemHigh => "system_high",
        }
    }

    pub const ALL: &'static [ColorSlot] = &[
        ColorSlot::Text,
        ColorSlot::Muted,
        ColorSlot::Label,
        ColorSlot::Separator,
        ColorSlot::Model,
        ColorSlot::Duration,
        ColorSlot::Cost,
        ColorSlot::LinesAdded,
        ColorSlot::LinesRemoved,
        ColorSlot::Branch,
        ColorSlot::Changes,
        ColorSlot::Tag,
        ColorSlot::ContextLow,
        ColorSlot::ContextMedium,
        ColorSlot::ContextHigh,
        ColorSlot::CacheHigh,
        ColorSlot::CacheMedium,
        ColorSlot::CacheLow,
        ColorSlot::CacheRead,
        ColorSlot::CacheWrite,
        ColorSlot::ToolRunning,
        ColorSlot::ToolCompleted,
        ColorSlot::ToolName,
        ColorSlot::ToolCount,
        ColorSlot::ConfigCount,
        ColorSlot::ConfigLabel,
        ColorSlot::SystemCpu,
        ColorSlot::SystemMemory,
        ColorSlot::SystemHigh,
    ];
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot-to-color mapping for one theme, with per-widget overrides applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThemeColors {
    slots: BTreeMap<ColorSlot, Color>,
}

impl ThemeColors {
    pub fn new(slots: BTreeMap<ColorSlot, Color>) -> Self {
        Self { slots }
    }

    /// Whether the theme itself defines `slot` (no fallback).
    pub fn defines(&self, slot: ColorSlot) -> bool {
        self.slots.contains_key(&slot)
    }

    /// Resolve a slot, falling back to the neutral gray palette.
    pub fn get(&self, slot: ColorSlot) -> Color {
        match self.slots.get(&slot) {
            Some(color) => *color,
            None => presets::neutral(slot),
        }
    }

    /// Foreground escape prefix for `slot`, as `colored` emits it.
    #[cfg(test)]
    pub fn escape(&self, slot: ColorSlot) -> String {
        format!("\x1b[{}m", self.get(slot).to_fg_str())
    }

    /// Color `text` with the slot's color.
    pub fn paint(&self, slot: ColorSlot, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        text.color(self.get(slot)).to_string()
    }

    /// Copy with user overrides applied. Unparseable color strings are
    /// ignored with a warning.
    pub fn with_overrides(&self, overrides: &BTreeMap<ColorSlot, String>) -> Self {
        let mut slots = self.slots.clone();
        for (slot, raw) in overrides {
            match parse_color(raw) {
                Some(color) => {
                    slots.insert(*slot, color);
                }
                None => tracing::warn!("ignoring invalid color '{}' for slot {}", raw, slot),
            }
        }
        Self { slots }
    }
}

/// A named palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub description: &'static str,
    pub colors: ThemeColors,
}

/// Paint with optional colors: plain text when colors are disabled.
pub fn paint(colors: Option<&ThemeColors>, slot: ColorSlot, text: &str) -> String {
    match colors {
        Some(c) => c.paint(slot, text),
        None => text.to_string(),
    }
}

/// Parse `#rrggbb` or a color name understood by `colored`.
pub fn parse_color(raw: &str) -> Option<Color> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::TrueColor { r, g, b });
    }
    raw.parse::<Color>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(
            parse_color("#ff8800"),
            Some(Color::TrueColor { r: 255, g: 136, b: 0 })
        );
        assert_eq!(parse_color("#ff88"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("#aé123"), None);
        assert_eq!(parse_color("#ééé"), None);
    }

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("green"), Some(Color::Green));
        assert_eq!(parse_color("not-a-color"), None);
    }

    #[test]
    fn test_missing_slot_falls_back_to_neutral() {
        let colors = ThemeColors::default();
        assert!(!colors.defines(ColorSlot::SystemCpu));
        assert_eq!(colors.get(ColorSlot::SystemCpu), presets::neutral(ColorSlot::SystemCpu));
    }

    #[test]
    fn test_paint_wraps_in_escape_and_reset() {
        colored::control::set_override(true);
        let mut slots = BTreeMap::new();
        slots.insert(ColorSlot::Cost, Color::Yellow);
        let colors = ThemeColors::new(slots);
        let out = colors.paint(ColorSlot::Cost, "$0.42");
        assert!(out.starts_with("\x1b[33m"));
        assert!(out.ends_with("\x1b[0m"));
        assert!(out.contains("$0.42"));
    }

    #[test]
    fn test_paint_empty_text_stays_empty() {
        let colors = get_theme_by_name("gray").colors;
        assert_eq!(colors.paint(ColorSlot::Cost, ""), "");
    }

    #[test]
    fn test_paint_without_colors_is_plain() {
        assert_eq!(paint(None, ColorSlot::Model, "Opus"), "Opus");
    }

    #[test]
    fn test_with_overrides_replaces_and_ignores_invalid() {
        let base = get_theme_by_name("gray").colors;
        let mut overrides = BTreeMap::new();
        overrides.insert(ColorSlot::Model, "#010203".to_string());
        overrides.insert(ColorSlot::Cost, "nope".to_string());
        let colors = base.with_overrides(&overrides);
        assert_eq!(colors.get(ColorSlot::Model), Color::TrueColor { r: 1, g: 2, b: 3 });
        assert_eq!(colors.get(ColorSlot::Cost), base.get(ColorSlot::Cost));
    }

    #[test]
    fn test_with_overrides_ignores_non_ascii_hex() {
        let base = get_theme_by_name("gray").colors;
        let mut overrides = BTreeMap::new();
        overrides.insert(ColorSlot::Model, "#aé123".to_string());
        let colors = base.with_overrides(&overrides);
        assert_eq!(colors.get(ColorSlot::Model), base.get(ColorSlot::Model));
    }

    #[test]
    fn test_slot_display_is_snake_case() {
        assert_eq!(ColorSlot::ContextMedium.to_string(), "context_medium");
        for slot in ColorSlot::ALL {
            let json = serde_json::to_string(slot).unwrap();
            assert_eq!(json, format!("\"{}\"", slot.as_str()));
        }
        let parsed: ColorSlot = serde_json::from_str("\"lines_added\"").unwrap();
        assert_eq!(parsed, ColorSlot::LinesAdded);
    }
}
