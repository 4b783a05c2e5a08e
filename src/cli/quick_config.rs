use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::{Args as ClapArgs, ValueEnum};

use super::{output, statusline};
use crate::config::{self, default_lines, ScopeConfig, WidgetEntry};
use crate::style::Style;
use crate::theme::{all_themes, DEFAULT_THEME};
use crate::widget::WidgetKind;

/// How many status lines the generated config spreads widgets over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Session basics and git on one line
    Single,
    /// Session basics, then git and cache
    Double,
    /// Every widget on its default line
    Triple,
}

/// Arguments for the `claude-scope quick-config` subcommand.
#[derive(ClapArgs)]
pub struct Args {
    /// Layout preset
    #[arg(long, value_enum, default_value = "double")]
    pub layout: Layout,

    /// Style applied to every widget
    #[arg(long, default_value = "balanced")]
    pub style: Style,

    /// Theme name (see `claude-scope themes`)
    #[arg(long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Print the config to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(args: Args, render: &statusline::Args) -> Result<()> {
    let theme = args.theme.trim().to_ascii_lowercase();
    if !all_themes().iter().any(|t| t.name == theme) {
        bail!(
            "unknown theme '{}' (run `claude-scope themes` to list them)",
            args.theme
        );
    }

    let config = build(args.layout, args.style, &theme);

    if args.stdout {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let path = config::config_path(render.config.as_deref())?;
    if path.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }

    config::save(&config, &path)?;
    output::success(&format!("Wrote {}", path.display()));
    output::info("Set the statusline command in Claude Code settings to `claude-scope`.");
    Ok(())
}

const SESSION_ROW: &[WidgetKind] = &[
    WidgetKind::Model,
    WidgetKind::Context,
    WidgetKind::Cost,
    WidgetKind::Duration,
    WidgetKind::Lines,
];

const SINGLE_ROW: &[WidgetKind] = &[
    WidgetKind::Model,
    WidgetKind::Context,
    WidgetKind::Cost,
    WidgetKind::Duration,
    WidgetKind::Lines,
    WidgetKind::Git,
];

const REPO_ROW: &[WidgetKind] = &[WidgetKind::Git, WidgetKind::GitTag, WidgetKind::CacheMetrics];

/// Config for a layout preset with one style and theme throughout.
pub fn build(layout: Layout, style: Style, theme: &str) -> ScopeConfig {
    let lines = match layout {
        Layout::Single => place(&[(0, SINGLE_ROW)], style),
        Layout::Double => place(&[(0, SESSION_ROW), (1, REPO_ROW)], style),
        Layout::Triple => default_lines(style),
    };

    ScopeConfig {
        theme: theme.to_string(),
        lines,
        ..Default::default()
    }
}

fn place(rows: &[(usize, &[WidgetKind])], style: Style) -> BTreeMap<usize, Vec<WidgetEntry>> {
    rows.iter()
        .map(|(line, kinds)| {
            let entries: Vec<WidgetEntry> = kinds.iter().map(|k| WidgetEntry::new(*k, style)).collect();
            (*line, entries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(config: &ScopeConfig, line: usize) -> Vec<String> {
        config.lines[&line].iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_single_layout_is_one_line() {
        let config = build(Layout::Single, Style::Compact, "nord");
        assert_eq!(config.lines.len(), 1);
        assert_eq!(ids(&config, 0).last().map(String::as_str), Some("git"));
        assert!(config.lines[&0].iter().all(|e| e.style == Style::Compact));
        assert_eq!(config.theme, "nord");
    }

    #[test]
    fn test_double_layout() {
        let config = build(Layout::Double, Style::Balanced, DEFAULT_THEME);
        assert_eq!(config.lines.len(), 2);
        assert_eq!(ids(&config, 1), ["git", "git-tag", "cache-metrics"]);
    }

    #[test]
    fn test_triple_layout_matches_defaults() {
        let config = build(Layout::Triple, Style::Balanced, DEFAULT_THEME);
        assert_eq!(config.lines, ScopeConfig::default().lines);
    }
}
