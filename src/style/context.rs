use super::{indicator, labeled, Style, StyleMap, Styled};
use crate::format::{
    format_k_floor, format_k_tokens, progress_bar, PROGRESS_BAR_WIDTH, STYLE_BAR_WIDTH,
};
use crate::theme::{paint, ColorSlot, ThemeColors};

/// Context window occupancy for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextData {
    /// Rounded share of the window in use, 0-100.
    pub percent: u8,
    pub used: u64,
    pub context_window_size: u64,
}

impl ContextData {
    /// Build from raw counts. `None` for a zero-sized window.
    pub fn new(used: u64, context_window_size: u64) -> Option<Self> {
        if context_window_size == 0 {
            return None;
        }
        let percent = (used as f64 / context_window_size as f64 * 100.0).round();
        Some(Self {
            percent: percent.clamp(0.0, 100.0) as u8,
            used,
            context_window_size,
        })
    }

    /// Low below 50%, medium to 79%, high from 80%.
    pub fn tier(&self) -> ColorSlot {
        match self.percent {
            0..=49 => ColorSlot::ContextLow,
            50..=79 => ColorSlot::ContextMedium,
            _ => ColorSlot::ContextHigh,
        }
    }

    fn pie(&self) -> &'static str {
        match self.percent {
            0..=24 => "○",
            25..=49 => "◔",
            50..=74 => "◑",
            75..=99 => "◕",
            _ => "●",
        }
    }
}

fn balanced(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    let bar = progress_bar(d.percent as f64, PROGRESS_BAR_WIDTH);
    paint(colors, d.tier(), &format!("{} {}%", bar, d.percent))
}

fn compact(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    paint(colors, d.tier(), &format!("{}%", d.percent))
}

fn playful(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    let bar = progress_bar(d.percent as f64, STYLE_BAR_WIDTH);
    format!("🧠 {}", paint(colors, d.tier(), &format!("[{}] {}%", bar, d.percent)))
}

fn verbose(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    let text = format!(
        "{}/{} tokens ({}%)",
        format_k_floor(d.used),
        format_k_floor(d.context_window_size),
        d.percent
    );
    paint(colors, d.tier(), &text)
}

fn technical(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    let text = format!("{}/{} ({}%)", d.used, d.context_window_size, d.percent);
    paint(colors, d.tier(), &text)
}

fn symbolic(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    paint(colors, d.tier(), &format!("{} {}%", d.pie(), d.percent))
}

fn labeled_style(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    let value = format!(
        "{}% ({}/{})",
        d.percent,
        format_k_tokens(d.used),
        format_k_tokens(d.context_window_size)
    );
    labeled(colors, "Context", &paint(colors, d.tier(), &value))
}

fn indicator_style(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    indicator(colors, d.tier(), &format!("{}%", d.percent))
}

fn fancy(d: &ContextData, colors: Option<&ThemeColors>) -> String {
    let bar = progress_bar(d.percent as f64, STYLE_BAR_WIDTH);
    format!(
        "⟨{}⟩ {}",
        paint(colors, d.tier(), &bar),
        paint(colors, d.tier(), &format!("{}%", d.percent))
    )
}

static STYLES: StyleMap<ContextData> = StyleMap {
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
        (Style::Fancy, fancy),
    ],
};

impl Styled for ContextData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
