use super::{Style, StyleMap, Styled};
use crate::theme::ThemeColors;

/// Braille blank: invisible, but not whitespace, so the line is not trimmed away.
pub const BLANK_GLYPH: &str = "\u{2800}";

/// A deliberately empty status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyLineData;

fn balanced(_: &EmptyLineData, _: Option<&ThemeColors>) -> String {
    BLANK_GLYPH.to_string()
}

static STYLES: StyleMap<EmptyLineData> = StyleMap {
    default: Style::Balanced,
    entries: &[(Style::Balanced, balanced)],
};

impl Styled for EmptyLineData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
