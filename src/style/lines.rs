use super::{indicator, labeled, Style, StyleMap, Styled};
use crate::format::join_nonzero;
use crate::theme::{paint, ColorSlot, ThemeColors};

/// Session line churn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinesData {
    pub added: u64,
    pub removed: u64,
}

fn pair(d: &LinesData, colors: Option<&ThemeColors>, sep: &str) -> String {
    format!(
        "{}{}{}",
        paint(colors, ColorSlot::LinesAdded, &format!("+{}", d.added)),
        sep,
        paint(colors, ColorSlot::LinesRemoved, &format!("-{}", d.removed))
    )
}

fn balanced(d: &LinesData, colors: Option<&ThemeColors>) -> String {
    pair(d, colors, "/")
}

fn compact(d: &LinesData, colors: Option<&ThemeColors>) -> String {
    pair(d, colors, "")
}

fn playful(d: &LinesData, colors: Option<&ThemeColors>) -> String {
    format!(
        "➕{} ➖{}",
        paint(colors, ColorSlot::LinesAdded, &d.added.to_string()),
        paint(colors, ColorSlot::LinesRemoved, &d.removed.to_string())
    )
}

/// Zero-suppressed: "+142 added, -27 removed", "+142 added", or "".
fn verbose(d: &LinesData, colors: Option<&ThemeColors>) -> String {
    join_nonzero(
        [
            (
                d.added,
                paint(colors, ColorSlot::LinesAdded, &format!("+{} added", d.added)),
            ),
            (
                d.removed,
                paint(colors, ColorSlot::LinesRemoved, &format!("-{} removed", d.removed)),
            ),
        ],
        ", ",
    )
}

fn labeled_style(d: &LinesData, colors: Option<&ThemeColors>) -> String {
    labeled(colors, "Lines", &pair(d, colors, "/"))
}

fn indicator_style(d: &LinesData, colors: Option<&ThemeColors>) -> String {
    indicator(colors, ColorSlot::LinesAdded, &pair(d, colors, "/"))
}

static STYLES: StyleMap<LinesData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Compact, compact),
        (Style::Playful, playful),
        (Style::Verbose, verbose),
        (Style::Labeled, labeled_style),
        (Style::Indicator, indicator_style),
    ],
};

impl Styled for LinesData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(added: u64, removed: u64, style: Style) -> String {
        LinesData { added, removed }.render_style(style, None).unwrap()
    }

    #[test]
    fn test_styles() {
        assert_eq!(render(142, 27, Style::Balanced), "+142/-27");
        assert_eq!(render(142, 27, Style::Compact), "+142-27");
        assert_eq!(render(142, 27, Style::Playful), "➕142 ➖27");
        assert_eq!(render(142, 27, Style::Verbose), "+142 added, -27 removed");
        assert_eq!(render(142, 27, Style::Labeled), "Lines: +142/-27");
        assert_eq!(render(142, 27, Style::Indicator), "● +142/-27");
    }

    #[test]
    fn test_verbose_suppresses_zero_components() {
        assert_eq!(render(142, 0, Style::Verbose), "+142 added");
        assert_eq!(render(0, 27, Style::Verbose), "-27 removed");
        assert_eq!(render(0, 0, Style::Verbose), "");
    }
}
