use super::{indicator, labeled, Style, StyleMap, Styled};
use crate::format::{format_duration, format_duration_compact};
use crate::theme::{paint, ColorSlot, ThemeColors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationData {
    pub total_ms: u64,
    pub api_ms: Option<u64>,
}

fn balanced(d: &DurationData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Duration, &format_duration(d.total_ms))
}

fn compact(d: &DurationData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Duration, &format_duration_compact(d.total_ms))
}

fn playful(d: &DurationData, colors: Option<&ThemeColors>) -> String {
    format!("⌛ {}", paint(colors, ColorSlot::Duration, &format_duration(d.total_ms)))
}

fn verbose(d: &DurationData, colors: Option<&ThemeColors>) -> String {
    let total = paint(colors, ColorSlot::Duration, &format_duration(d.total_ms));
    match d.api_ms {
        Some(api) if api > 0 => format!(
            "{} {}",
            total,
            paint(colors, ColorSlot::Muted, &format!("(api {})", format_duration(api)))
        ),
        _ => total,
    }
}

fn technical(d: &DurationData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Duration, &format!("{}ms", d.total_ms))
}

fn symbolic(d: &DurationData, colors: Option<&ThemeColors>) -> String {
    format!("◷ {}", paint(colors, ColorSlot::Duration, &format_duration(d.total_ms)))
}

fn labeled_style(d: &DurationData, colors: Option<&ThemeColors>) -> String {
    labeled(
        colors,
        "Time",
        &paint(colors, ColorSlot::Duration, &format_duration(d.total_ms)),
    )
}

fn indicator_style(d: &DurationData, colors: Option<&ThemeColors>) -> String {
    indicator(colors, ColorSlot::Duration, &format_duration(d.total_ms))
}

static STYLES: StyleMap<DurationData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Compact, compact),
        (Style::Playful, playful),
        (Style::Verbose, verbose),
        (Style::Technical, technical),
        (Style::Symbolic, symbolic),
        (Style::Labeled, labeled_style),
        (Style::Indicator, indicator_style),
    ],
};

impl Styled for DurationData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
