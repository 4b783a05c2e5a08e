use super::{indicator, labeled, Style, StyleMap, Styled};
use crate::theme::{paint, ColorSlot, ThemeColors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelData {
    pub id: String,
    pub display_name: String,
}

impl ModelData {
    /// Display name without the vendor prefix ("Claude Opus 4.5" -> "Opus 4.5").
    pub fn short_name(&self) -> &str {
        self.display_name
            .strip_prefix("Claude ")
            .unwrap_or(&self.display_name)
    }
}

fn balanced(d: &ModelData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Model, &d.display_name)
}

fn compact(d: &ModelData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Model, d.short_name())
}

fn playful(d: &ModelData, colors: Option<&ThemeColors>) -> String {
    format!("🤖 {}", paint(colors, ColorSlot::Model, d.short_name()))
}

fn technical(d: &ModelData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Model, &d.id)
}

fn symbolic(d: &ModelData, colors: Option<&ThemeColors>) -> String {
    format!("◆ {}", paint(colors, ColorSlot::Model, d.short_name()))
}

fn labeled_style(d: &ModelData, colors: Option<&ThemeColors>) -> String {
    labeled(colors, "Model", &paint(colors, ColorSlot::Model, &d.display_name))
}

fn indicator_style(d: &ModelData, colors: Option<&ThemeColors>) -> String {
    indicator(colors, ColorSlot::Model, &d.display_name)
}

static STYLES: StyleMap<ModelData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Compact, compact),
        (Style::Playful, playful),
        (Style::Technical, technical),
        (Style::Symbolic, symbolic),
        (Style::Labeled, labeled_style),
        (Style::Indicator, indicator_style),
    ],
};

impl Styled for ModelData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
