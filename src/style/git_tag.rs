use super::{indicator, labeled, Style, StyleMap, Styled};
use crate::theme::{paint, ColorSlot, ThemeColors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitTagData {
    pub tag: String,
}

fn balanced(d: &GitTagData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Tag, &d.tag)
}

fn playful(d: &GitTagData, colors: Option<&ThemeColors>) -> String {
    format!("🏷️ {}", paint(colors, ColorSlot::Tag, &d.tag))
}

fn labeled_style(d: &GitTagData, colors: Option<&ThemeColors>) -> String {
    labeled(colors, "Tag", &paint(colors, ColorSlot::Tag, &d.tag))
}

fn indicator_style(d: &GitTagData, colors: Option<&ThemeColors>) -> String {
    indicator(colors, ColorSlot::Tag, &d.tag)
}

fn fancy(d: &GitTagData, colors: Option<&ThemeColors>) -> String {
    format!("⟨{}⟩", paint(colors, ColorSlot::Tag, &d.tag))
}

static STYLES: StyleMap<GitTagData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Playful, playful),
        (Style::Labeled, labeled_style),
        (Style::Indicator, indicator_style),
        (Style::Fancy, fancy),
    ],
};

impl Styled for GitTagData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles() {
        let d = GitTagData {
            tag: "v1.2.0".to_string(),
        };
        let r = |s| d.render_style(s, None).unwrap();
        assert_eq!(r(Style::Balanced), "v1.2.0");
        assert_eq!(r(Style::Playful), "🏷️ v1.2.0");
        assert_eq!(r(Style::Labeled), "Tag: v1.2.0");
        assert_eq!(r(Style::Indicator), "● v1.2.0");
        assert_eq!(r(Style::Fancy), "⟨v1.2.0⟩");
        assert_eq!(r(Style::Compact), "v1.2.0");
    }
}
