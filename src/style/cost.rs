use super::{indicator, labeled, Style, StyleMap, Styled};
use crate::format::{format_cost_tiered, format_cost_usd};
use crate::theme::{paint, ColorSlot, ThemeColors};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostData {
    pub usd: f64,
}

fn balanced(d: &CostData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Cost, &format_cost_usd(d.usd))
}

/// The only style using tiered precision.
fn compact(d: &CostData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Cost, &format_cost_tiered(d.usd))
}

fn playful(d: &CostData, colors: Option<&ThemeColors>) -> String {
    format!("💰 {}", paint(colors, ColorSlot::Cost, &format_cost_usd(d.usd)))
}

fn labeled_style(d: &CostData, colors: Option<&ThemeColors>) -> String {
    labeled(colors, "Cost", &paint(colors, ColorSlot::Cost, &format_cost_usd(d.usd)))
}

fn indicator_style(d: &CostData, colors: Option<&ThemeColors>) -> String {
    indicator(colors, ColorSlot::Cost, &format_cost_usd(d.usd))
}

static STYLES: StyleMap<CostData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Compact, compact),
        (Style::Playful, playful),
        (Style::Labeled, labeled_style),
        (Style::Indicator, indicator_style),
    ],
};

impl Styled for CostData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
