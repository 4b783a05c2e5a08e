use super::{indicator, labeled, separator, Style, StyleMap, Styled};
use crate::format::{format_k_tokens, join_nonzero};
use crate::telemetry::TokenUsage;
use crate::theme::{paint, ColorSlot, ThemeColors};

/// Prompt cache effectiveness for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsData {
    pub cache_read: u64,
    pub cache_write: u64,
    /// Every input token: fresh, cache write and cache read.
    pub total_input: u64,
    /// Rounded share of input served from cache, 0-100.
    pub hit_rate: u8,
}

impl CacheMetricsData {
    /// `None` when there was no input at all.
    pub fn from_usage(usage: &TokenUsage) -> Option<Self> {
        let total_input = usage.total_input();
        if total_input == 0 {
            return None;
        }
        let rate = (usage.cache_read_input_tokens as f64 / total_input as f64 * 100.0).round();
        Some(Self {
            cache_read: usage.cache_read_input_tokens,
            cache_write: usage.cache_creation_input_tokens,
            total_input,
            hit_rate: rate.clamp(0.0, 100.0) as u8,
        })
    }

    /// High from 70%, medium from 40%, low below.
    pub fn tier(&self) -> ColorSlot {
        match self.hit_rate {
            70..=u8::MAX => ColorSlot::CacheHigh,
            40..=69 => ColorSlot::CacheMedium,
            _ => ColorSlot::CacheLow,
        }
    }

    fn rate(&self, colors: Option<&ThemeColors>) -> String {
        paint(colors, self.tier(), &format!("{}%", self.hit_rate))
    }
}

fn balanced(d: &CacheMetricsData, colors: Option<&ThemeColors>) -> String {
    format!("{} {}", d.rate(colors), paint(colors, ColorSlot::Muted, "cache"))
}

fn compact(d: &CacheMetricsData, colors: Option<&ThemeColors>) -> String {
    format!("⚡{}", d.rate(colors))
}

fn playful(d: &CacheMetricsData, colors: Option<&ThemeColors>) -> String {
    format!("💾 {}", d.rate(colors))
}

fn verbose(d: &CacheMetricsData, colors: Option<&ThemeColors>) -> String {
    let flows = join_nonzero(
        [
            (
                d.cache_read,
                paint(
                    colors,
                    ColorSlot::CacheRead,
                    &format!("{} read", format_k_tokens(d.cache_read)),
                ),
            ),
            (
                d.cache_write,
                paint(
                    colors,
                    ColorSlot::CacheWrite,
                    &format!("{} written", format_k_tokens(d.cache_write)),
                ),
            ),
        ],
        ", ",
    );
    let hit = format!("{} hit rate", d.rate(colors));
    if flows.is_empty() {
        hit
    } else {
        format!("{}{}{}", flows, separator(colors), hit)
    }
}

fn technical(d: &CacheMetricsData, colors: Option<&ThemeColors>) -> String {
    format!(
        "r:{} w:{} in:{} ({})",
        d.cache_read,
        d.cache_write,
        d.total_input,
        d.rate(colors)
    )
}

fn labeled_style(d: &CacheMetricsData, colors: Option<&ThemeColors>) -> String {
    labeled(colors, "Cache", &d.rate(colors))
}

fn indicator_style(d: &CacheMetricsData, colors: Option<&ThemeColors>) -> String {
    indicator(colors, d.tier(), &format!("{}%", d.hit_rate))
}

static STYLES: StyleMap<CacheMetricsData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Compact, compact),
        (Style::Playful, playful),
        (Style::Verbose, verbose),
        (Style::Technical, technical),
        (Style::Labeled, labeled_style),
        (Style::Indicator, indicator_style),
    ],
};

impl Styled for CacheMetricsData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
