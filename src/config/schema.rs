use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_EXPIRY_MS;
use crate::style::Style;
use crate::theme::{ColorSlot, DEFAULT_THEME};
use crate::widget::WidgetKind;

pub const CONFIG_VERSION: &str = "1.0.0";

pub const DEFAULT_GIT_TIMEOUT_MS: u64 = 1000;

/// Top-level `config.json`. Any missing field takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub version: String,
    pub theme: String,
    /// Placed between widgets on the same line.
    pub separator: String,
    /// Line index to widgets, rendered in ascending order.
    pub lines: BTreeMap<usize, Vec<WidgetEntry>>,
    pub flags: WidgetFlags,
    pub cache: CacheSettings,
    pub git_timeout_ms: u64,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            theme: DEFAULT_THEME.to_string(),
            separator: " ".to_string(),
            lines: default_lines(Style::Balanced),
            flags: WidgetFlags::default(),
            cache: CacheSettings::default(),
            git_timeout_ms: DEFAULT_GIT_TIMEOUT_MS,
        }
    }
}

/// One widget placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetEntry {
    pub id: String,
    pub style: Style,
    pub enabled: bool,
    /// Per-widget slot overrides, e.g. `{"model": "#cba6f7"}`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub colors: BTreeMap<ColorSlot, String>,
}

impl Default for WidgetEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            style: Style::Balanced,
            enabled: true,
            colors: BTreeMap::new(),
        }
    }
}

impl WidgetEntry {
    pub fn new(kind: WidgetKind, style: Style) -> Self {
        Self {
            id: kind.id().to_string(),
            style,
            ..Default::default()
        }
    }
}

/// Switches for the optional widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetFlags {
    pub active_tools: bool,
    pub cache_metrics: bool,
    pub config_count: bool,
    pub system_monitor: bool,
    pub git_tag: bool,
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self {
            active_tools: true,
            cache_metrics: true,
            config_count: true,
            system_monitor: false,
            git_tag: true,
        }
    }
}

impl WidgetFlags {
    /// Every optional kind switched on.
    pub fn all() -> Self {
        Self {
            active_tools: true,
            cache_metrics: true,
            config_count: true,
            system_monitor: true,
            git_tag: true,
        }
    }

    pub fn allows(&self, kind: WidgetKind) -> bool {
        match kind {
            WidgetKind::ActiveTools => self.active_tools,
            WidgetKind::CacheMetrics => self.cache_metrics,
            WidgetKind::ConfigCount => self.config_count,
            WidgetKind::SystemMonitor => self.system_monitor,
            WidgetKind::GitTag => self.git_tag,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Defaults to `~/.claude-scope/cache.json`.
    pub path: Option<String>,
    pub expiry_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            path: None,
            expiry_ms: DEFAULT_EXPIRY_MS,
        }
    }
}

/// Every kind on its default line, all with `style`.
pub fn default_lines(style: Style) -> BTreeMap<usize, Vec<WidgetEntry>> {
    let mut lines: BTreeMap<usize, Vec<WidgetEntry>> = BTreeMap::new();
    for kind in WidgetKind::ALL {
        if *kind == WidgetKind::EmptyLine {
            continue;
        }
        lines
            .entry(kind.default_line())
            .or_default()
            .push(WidgetEntry::new(*kind, style));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: ScopeConfig = serde_json::from_str(r#"{"theme": "nord"}"#).unwrap();
        assert_eq!(config.theme, "nord");
        assert_eq!(config.separator, " ");
        assert_eq!(config.git_timeout_ms, DEFAULT_GIT_TIMEOUT_MS);
        assert!(!config.flags.system_monitor);
        assert!(config.flags.git_tag);
        assert_eq!(config.cache.expiry_ms, DEFAULT_EXPIRY_MS);
        assert!(config.lines.contains_key(&0));
    }

    #[test]
    fn test_lines_keyed_by_string_index() {
        let raw = r##"{
            "lines": {
                "0": [{"id": "model", "style": "compact", "colors": {"model": "#cba6f7"}}],
                "2": [{"id": "cost", "style": "sparkly", "enabled": false}]
            }
        }"##;
        let config: ScopeConfig = serde_json::from_str(raw).unwrap();
        let model = &config.lines[&0][0];
        assert_eq!(model.style, Style::Compact);
        assert!(model.enabled);
        assert_eq!(model.colors[&ColorSlot::Model], "#cba6f7");

        let cost = &config.lines[&2][0];
        assert_eq!(cost.style, Style::Unknown);
        assert!(!cost.enabled);
    }

    #[test]
    fn test_flags_gate_optional_kinds_only() {
        let flags = WidgetFlags::default();
        assert!(!flags.allows(WidgetKind::SystemMonitor));
        assert!(flags.allows(WidgetKind::Model));
        assert!(flags.allows(WidgetKind::EmptyLine));
        assert!(WidgetFlags::all().allows(WidgetKind::SystemMonitor));
    }

    #[test]
    fn test_default_lines_follow_kind_defaults() {
        let lines = default_lines(Style::Balanced);
        let ids = |line: usize| -> Vec<&str> {
            lines[&line].iter().map(|e| e.id.as_str()).collect()
        };
        assert_eq!(ids(0), ["model", "context", "cost", "duration", "lines"]);
        assert_eq!(ids(1), ["git", "git-tag", "cache-metrics"]);
        assert_eq!(ids(2), ["active-tools", "config-count", "system-monitor"]);
        assert!(!lines.contains_key(&3));
    }

    #[test]
    fn test_round_trip_keeps_shape() {
        let config = ScopeConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"0\""));
        let back: ScopeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
