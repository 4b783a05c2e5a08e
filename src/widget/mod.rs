//! Widgets: one configured statusline component each.
//!
//! A widget is built once per invocation and walks
//! `Uninitialized -> Initialized -> (Updated <-> Rendered) -> Disposed`.
//! `update` does all I/O (through [`Providers`]); `render` only formats the
//! stored snapshot and never fails loudly.

pub mod compose;
pub mod data;
pub mod registry;

use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::config::WidgetEntry;
use crate::providers::Providers;
use crate::style::{self, Style};
use crate::telemetry::SessionTelemetry;
use crate::theme::ThemeColors;

pub use compose::compose;
pub use data::WidgetData;
pub use registry::WidgetRegistry;

/// Every kind of widget the statusline knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Model,
    Context,
    Cost,
    Duration,
    Lines,
    Git,
    GitTag,
    CacheMetrics,
    ActiveTools,
    ConfigCount,
    SystemMonitor,
    EmptyLine,
}

impl WidgetKind {
    pub const ALL: &'static [WidgetKind] = &[
        WidgetKind::Model,
        WidgetKind::Context,
        WidgetKind::Cost,
        WidgetKind::Duration,
        WidgetKind::Lines,
        WidgetKind::Git,
        WidgetKind::GitTag,
        WidgetKind::CacheMetrics,
        WidgetKind::ActiveTools,
        WidgetKind::ConfigCount,
        WidgetKind::SystemMonitor,
        WidgetKind::EmptyLine,
    ];

    /// The id used in config files.
    pub fn id(&self) -> &'static str {
        match self {
            WidgetKind::Model => "model",
            WidgetKind::Context => "context",
            WidgetKind::Cost => "cost",
            WidgetKind::Duration => "duration",
            WidgetKind::Lines => "lines",
            WidgetKind::Git => "git",
            WidgetKind::GitTag => "git-tag",
            WidgetKind::CacheMetrics => "cache-metrics",
            WidgetKind::ActiveTools => "active-tools",
            WidgetKind::ConfigCount => "config-count",
            WidgetKind::SystemMonitor => "system-monitor",
            WidgetKind::EmptyLine => "empty-line",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        WidgetKind::ALL.iter().copied().find(|k| k.id() == id.trim())
    }

    pub fn default_line(&self) -> usize {
        match self {
            WidgetKind::Model
            | WidgetKind::Context
            | WidgetKind::Cost
            | WidgetKind::Duration
            | WidgetKind::Lines => 0,
            WidgetKind::Git | WidgetKind::GitTag | WidgetKind::CacheMetrics => 1,
            WidgetKind::ActiveTools | WidgetKind::ConfigCount | WidgetKind::SystemMonitor => 2,
            WidgetKind::EmptyLine => 3,
        }
    }

    /// Whether several instances may share one registry.
    pub fn allows_multiple(&self) -> bool {
        matches!(self, WidgetKind::EmptyLine)
    }

    pub fn metadata(&self) -> WidgetMetadata {
        let (name, description) = match self {
            WidgetKind::Model => ("Model", "Active model name"),
            WidgetKind::Context => ("Context", "Context window usage with progress bar"),
            WidgetKind::Cost => ("Cost", "Session cost in USD"),
            WidgetKind::Duration => ("Duration", "Elapsed session time"),
            WidgetKind::Lines => ("Lines", "Lines added and removed this session"),
            WidgetKind::Git => ("Git", "Current branch and working tree changes"),
            WidgetKind::GitTag => ("Git Tag", "Most recent reachable tag"),
            WidgetKind::CacheMetrics => ("Cache Metrics", "Prompt cache hit rate"),
            WidgetKind::ActiveTools => ("Active Tools", "Running and completed tool calls"),
            WidgetKind::ConfigCount => ("Config Count", "CLAUDE.md files, rules, MCP servers and hooks"),
            WidgetKind::SystemMonitor => ("System Monitor", "CPU load and memory usage"),
            WidgetKind::EmptyLine => ("Empty Line", "A blank separator line"),
        };
        WidgetMetadata {
            name,
            description,
            version: env!("CARGO_PKG_VERSION"),
            author: "claude-scope",
            default_line: Some(self.default_line()),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub default_line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Uninitialized,
    Initialized,
    Updated,
    Rendered,
    Disposed,
}

/// Passed to every widget at render time. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub width: u16,
    /// Milliseconds since the epoch.
    pub timestamp: u64,
}

pub struct Widget {
    id: String,
    kind: WidgetKind,
    metadata: WidgetMetadata,
    style: Style,
    line: Option<usize>,
    enabled: bool,
    state: Cell<WidgetState>,
    colors: Option<ThemeColors>,
    data: Option<WidgetData>,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.id)
            .field("style", &self.style)
            .field("line", &self.get_line())
            .field("enabled", &self.enabled)
            .field("state", &self.state.get())
            .finish()
    }
}

impl Widget {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            id: kind.id().to_string(),
            kind,
            metadata: kind.metadata(),
            style: Style::Balanced,
            line: None,
            enabled: true,
            state: Cell::new(WidgetState::Uninitialized),
            colors: None,
            data: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn metadata(&self) -> &WidgetMetadata {
        &self.metadata
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Apply a config entry. `theme` is `None` when colors are disabled.
    /// Calling again re-initializes from scratch.
    pub fn initialize(&mut self, entry: &WidgetEntry, line: Option<usize>, theme: Option<&ThemeColors>) {
        self.enabled = entry.enabled;
        self.style = entry.style;
        self.line = line;
        self.colors = theme.map(|t| t.with_overrides(&entry.colors));
        self.data = None;
        if style::resolve(self.kind, self.style) != Some(self.style) {
            let known: Vec<_> = style::styles_for(self.kind)
                .iter()
                .map(Style::as_str)
                .collect();
            tracing::debug!(
                "{} has no '{}' style ({}), using its default",
                self.id,
                self.style,
                known.join(", ")
            );
        }
        self.state.set(WidgetState::Initialized);
    }

    /// Refresh the snapshot from telemetry and providers. Last write wins.
    pub fn update(&mut self, telemetry: &SessionTelemetry, providers: &Providers) {
        if self.state.get() == WidgetState::Disposed {
            tracing::debug!("ignoring update on disposed widget {}", self.id);
            return;
        }
        self.data = data::extract(self.kind, telemetry, providers);
        if let Some(d) = &self.data {
            debug_assert_eq!(d.kind(), self.kind);
        }
        self.state.set(WidgetState::Updated);
    }

    /// Format the stored snapshot. `None` when disabled, when there is no
    /// data, or when the style produced nothing.
    pub fn render(&self, ctx: &RenderContext) -> Option<String> {
        tracing::trace!(width = ctx.width, timestamp = ctx.timestamp, "render {}", self.id);
        self.render_with(style::render)
    }

    fn render_with<F>(&self, render: F) -> Option<String>
    where
        F: FnOnce(&WidgetData, Style, Option<&ThemeColors>) -> Option<String>,
    {
        if !self.enabled || self.state.get() == WidgetState::Disposed {
            return None;
        }
        let data = self.data.as_ref()?;
        let colors = self.colors.as_ref();
        let style = self.style;

        let output = match panic::catch_unwind(AssertUnwindSafe(|| render(data, style, colors))) {
            Ok(output) => output,
            Err(_) => {
                tracing::warn!("widget {} panicked while rendering", self.id);
                None
            }
        };
        self.state.set(WidgetState::Rendered);
        output.filter(|s| !s.is_empty())
    }

    pub fn set_line(&mut self, line: usize) {
        self.line = Some(line);
    }

    /// Configured line, else the kind's default line.
    pub fn get_line(&self) -> usize {
        self.line
            .or(self.metadata.default_line)
            .unwrap_or(0)
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn cleanup(&mut self) {
        self.data = None;
        self.state.set(WidgetState::Disposed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ModelData;
    use crate::telemetry::ModelInfo;
    use crate::theme::get_theme_by_name;

    fn ctx() -> RenderContext {
        RenderContext {
            width: 80,
            timestamp: 0,
        }
    }

    fn telemetry() -> SessionTelemetry {
        SessionTelemetry {
            model: Some(ModelInfo {
                id: Some("claude-opus-4-5".to_string()),
                display_name: Some("Claude Opus 4.5".to_string()),
            }),
            ..Default::default()
        }
    }

    fn model_widget() -> Widget {
        let mut w = Widget::new(WidgetKind::Model);
        w.initialize(&WidgetEntry::new(WidgetKind::Model, Style::Balanced), None, None);
        w
    }

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(WidgetKind::from_id("nope"), None);
    }

    #[test]
    fn test_only_empty_line_allows_multiple() {
        let multi: Vec<_> = WidgetKind::ALL
            .iter()
            .filter(|k| k.allows_multiple())
            .collect();
        assert_eq!(multi, [&WidgetKind::EmptyLine]);
    }

    #[test]
    fn test_lifecycle_states() {
        let mut w = Widget::new(WidgetKind::Model);
        assert_eq!(w.state.get(), WidgetState::Uninitialized);
        w.initialize(&WidgetEntry::new(WidgetKind::Model, Style::Compact), None, None);
        assert_eq!(w.state.get(), WidgetState::Initialized);
        w.update(&telemetry(), &Providers::mock());
        assert_eq!(w.state.get(), WidgetState::Updated);
        assert_eq!(w.render(&ctx()).as_deref(), Some("Opus 4.5"));
        assert_eq!(w.state.get(), WidgetState::Rendered);
        w.cleanup();
        assert_eq!(w.state.get(), WidgetState::Disposed);
        assert_eq!(w.render(&ctx()), None);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut w = model_widget();
        w.update(&telemetry(), &Providers::mock());
        let first = w.render(&ctx());
        assert_eq!(w.render(&ctx()), first);
    }

    #[test]
    fn test_render_without_data_is_none() {
        let w = model_widget();
        assert_eq!(w.render(&ctx()), None);
    }

    #[test]
    fn test_disabled_renders_nothing() {
        let mut w = Widget::new(WidgetKind::Model);
        let entry = WidgetEntry {
            enabled: false,
            ..WidgetEntry::new(WidgetKind::Model, Style::Balanced)
        };
        w.initialize(&entry, None, None);
        w.update(&telemetry(), &Providers::mock());
        assert_eq!(w.render(&ctx()), None);
    }

    #[test]
    fn test_panicking_render_is_isolated() {
        let mut w = model_widget();
        w.update(&telemetry(), &Providers::mock());
        let out = w.render_with(|_, _, _| panic!("boom"));
        assert_eq!(out, None);
        assert_eq!(w.state.get(), WidgetState::Rendered);
    }

    #[test]
    fn test_last_update_wins() {
        let mut w = model_widget();
        w.update(&telemetry(), &Providers::mock());
        let mut other = telemetry();
        other.model = Some(ModelInfo {
            id: Some("claude-sonnet".to_string()),
            display_name: Some("Claude Sonnet".to_string()),
        });
        w.update(&other, &Providers::mock());
        assert_eq!(
            w.data.as_ref(),
            Some(&WidgetData::Model(ModelData {
                id: "claude-sonnet".to_string(),
                display_name: "Claude Sonnet".to_string(),
            }))
        );
    }

    #[test]
    fn test_line_override_and_default() {
        let mut w = Widget::new(WidgetKind::Git);
        assert_eq!(w.get_line(), 1);
        w.set_line(4);
        assert_eq!(w.get_line(), 4);
    }

    #[test]
    fn test_color_overrides_apply_to_widget_only() {
        colored::control::set_override(true);
        let theme = get_theme_by_name("gray").colors;
        let mut entry = WidgetEntry::new(WidgetKind::Model, Style::Balanced);
        entry
            .colors
            .insert(crate::theme::ColorSlot::Model, "#010203".to_string());
        let mut w = Widget::new(WidgetKind::Model);
        w.initialize(&entry, None, Some(&theme));
        w.update(&telemetry(), &Providers::mock());
        let out = w.render(&ctx()).unwrap();
        assert!(out.starts_with("\x1b[38;2;1;2;3m"));
        assert_ne!(theme.escape(crate::theme::ColorSlot::Model), "\x1b[38;2;1;2;3m");
    }

    #[test]
    fn test_set_style() {
        let mut w = model_widget();
        w.set_style(Style::Technical);
        w.update(&telemetry(), &Providers::mock());
        assert_eq!(w.render(&ctx()).as_deref(), Some("claude-opus-4-5"));
    }
}
