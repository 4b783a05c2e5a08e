//! Style registry: per widget kind, a table of style name -> render function.
//!
//! A render function is a plain `fn(&Data, Option<&ThemeColors>) -> String`.
//! It does no I/O and handles every representable value (zero counts render
//! as an empty string or a placeholder, never an error). Dispatch is a
//! lookup in the kind's [`StyleMap`]; a style the kind lacks falls back to
//! the map's default, and a kind without that default renders nothing.

pub mod active_tools;
pub mod cache_metrics;
pub mod config_count;
pub mod context;
pub mod cost;
pub mod duration;
pub mod empty_line;
pub mod git;
pub mod git_tag;
pub mod lines;
pub mod model;
pub mod system_monitor;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::theme::{paint, ColorSlot, ThemeColors};
use crate::widget::{WidgetData, WidgetKind};

pub use active_tools::ActiveToolsData;
pub use cache_metrics::CacheMetricsData;
pub use config_count::ConfigCountData;
pub use context::ContextData;
pub use cost::CostData;
pub use duration::DurationData;
pub use empty_line::EmptyLineData;
pub use git::GitData;
pub use git_tag::GitTagData;
pub use lines::LinesData;
pub use model::ModelData;
pub use system_monitor::SystemMonitorData;

/// A named formatting variant. Names a kind does not implement fall back to
/// the kind's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Balanced,
    Compact,
    Playful,
    Verbose,
    Technical,
    Symbolic,
    Labeled,
    Indicator,
    Fancy,
    /// Anything else found in a config file.
    #[serde(other)]
    Unknown,
}

impl Style {
    pub const ALL: &'static [Style] = &[
        Style::Balanced,
        Style::Compact,
        Style::Playful,
        Style::Verbose,
        Style::Technical,
        Style::Symbolic,
        Style::Labeled,
        Style::Indicator,
        Style::Fancy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Balanced => "balanced",
            Style::Compact => "compact",
            Style::Playful => "playful",
            Style::Verbose => "verbose",
            Style::Technical => "technical",
            Style::Symbolic => "symbolic",
            Style::Labeled => "labeled",
            Style::Indicator => "indicator",
            Style::Fancy => "fancy",
            Style::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Style::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Style::ALL.iter().map(Style::as_str).collect();
                format!("unknown style '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

pub type RenderFn<D> = fn(&D, Option<&ThemeColors>) -> String;

/// The style table of one widget kind.
pub struct StyleMap<D: 'static> {
    pub default: Style,
    pub entries: &'static [(Style, RenderFn<D>)],
}

impl<D> StyleMap<D> {
    pub fn get(&self, style: Style) -> Option<RenderFn<D>> {
        self.entries
            .iter()
            .find(|(name, _)| *name == style)
            .map(|(_, f)| *f)
    }

    /// The style that will actually render for a request of `style`.
    pub fn effective(&self, style: Style) -> Option<Style> {
        if self.get(style).is_some() {
            return Some(style);
        }
        self.get(self.default).map(|_| self.default)
    }

    pub fn resolve(&self, style: Style) -> Option<RenderFn<D>> {
        self.effective(style).and_then(|s| self.get(s))
    }

    pub fn styles(&self) -> Vec<Style> {
        self.entries.iter().map(|(s, _)| *s).collect()
    }
}

/// Render data that carries its own style table.
pub trait Styled: Sized + 'static {
    fn style_map() -> &'static StyleMap<Self>;

    fn render_style(&self, style: Style, colors: Option<&ThemeColors>) -> Option<String> {
        let render = Self::style_map().resolve(style)?;
        Some(render(self, colors))
    }
}

macro_rules! dispatch_kind {
    ($kind:expr, $map:ident => $body:expr) => {
        match $kind {
            WidgetKind::Model => { let $map = ModelData::style_map(); $body }
            WidgetKind::Context => { let $map = ContextData::style_map(); $body }
            WidgetKind::Cost => { let $map = CostData::style_map(); $body }
            WidgetKind::Duration => { let $map = DurationData::style_map(); $body }
            WidgetKind::Lines => { let $map = LinesData::style_map(); $body }
            WidgetKind::Git => { let $map = GitData::style_map(); $body }
            WidgetKind::GitTag => { let $map = GitTagData::style_map(); $body }
            WidgetKind::CacheMetrics => { let $map = CacheMetricsData::style_map(); $body }
            WidgetKind::ActiveTools => { let $map = ActiveToolsData::style_map(); $body }
            WidgetKind::ConfigCount => { let $map = ConfigCountData::style_map(); $body }
            WidgetKind::SystemMonitor => { let $map = SystemMonitorData::style_map(); $body }
            WidgetKind::EmptyLine => { let $map = EmptyLineData::style_map(); $body }
        }
    };
}

/// The style `kind` renders when asked for `style`, after fallback.
pub fn resolve(kind: WidgetKind, style: Style) -> Option<Style> {
    dispatch_kind!(kind, map => map.effective(style))
}

/// Styles implemented by `kind`, in table order.
pub fn styles_for(kind: WidgetKind) -> Vec<Style> {
    dispatch_kind!(kind, map => map.styles())
}

/// Format `data` with `style`. `None` when the kind has no usable style.
pub fn render(data: &WidgetData, style: Style, colors: Option<&ThemeColors>) -> Option<String> {
    match data {
        WidgetData::Model(d) => d.render_style(style, colors),
        WidgetData::Context(d) => d.render_style(style, colors),
        WidgetData::Cost(d) => d.render_style(style, colors),
        WidgetData::Duration(d) => d.render_style(style, colors),
        WidgetData::Lines(d) => d.render_style(style, colors),
        WidgetData::Git(d) => d.render_style(style, colors),
        WidgetData::GitTag(d) => d.render_style(style, colors),
        WidgetData::CacheMetrics(d) => d.render_style(style, colors),
        WidgetData::ActiveTools(d) => d.render_style(style, colors),
        WidgetData::ConfigCount(d) => d.render_style(style, colors),
        WidgetData::SystemMonitor(d) => d.render_style(style, colors),
        WidgetData::EmptyLine(d) => d.render_style(style, colors),
    }
}

// ---------------------------------------------------------------------------
// Helpers shared by the style tables
// ---------------------------------------------------------------------------

/// A dimmed `│` between parts of one widget.
pub(crate) fn separator(colors: Option<&ThemeColors>) -> String {
    format!(" {} ", paint(colors, ColorSlot::Separator, "│"))
}

/// "Label: value" with the label in the label slot.
pub(crate) fn labeled(colors: Option<&ThemeColors>, label: &str, value: &str) -> String {
    format!("{} {}", paint(colors, ColorSlot::Label, &format!("{}:", label)), value)
}

/// "● value" with the dot carrying `slot`.
pub(crate) fn indicator(colors: Option<&ThemeColors>, slot: ColorSlot, value: &str) -> String {
    format!("{} {}", paint(colors, slot, "●"), value)
}
