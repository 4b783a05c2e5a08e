use std::collections::BTreeMap;

use super::{indicator, labeled, separator, Style, StyleMap, Styled};
use crate::format::{join_nonzero, pluralize};
use crate::theme::{paint, ColorSlot, ThemeColors};

/// Most completed tools listed by name before the rest are elided.
const MAX_COMPLETED_SHOWN: usize = 4;

/// Tool activity for the session: what is in flight and what has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveToolsData {
    pub running: Vec<String>,
    pub completed: BTreeMap<String, u64>,
}

impl ActiveToolsData {
    pub fn is_empty(&self) -> bool {
        self.running.is_empty() && self.completed.is_empty()
    }

    pub fn completed_total(&self) -> u64 {
        self.completed.values().sum()
    }

    /// Completed tools, most used first, ties by name.
    fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<_> = self
            .completed
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked.truncate(MAX_COMPLETED_SHOWN);
        ranked
    }
}

fn running_list(d: &ActiveToolsData, colors: Option<&ThemeColors>, marker: &str) -> Vec<String> {
    d.running
        .iter()
        .map(|name| {
            format!(
                "{} {}",
                paint(colors, ColorSlot::ToolRunning, marker),
                paint(colors, ColorSlot::ToolName, name)
            )
        })
        .collect()
}

fn completed_list(d: &ActiveToolsData, colors: Option<&ThemeColors>) -> Vec<String> {
    d.ranked()
        .into_iter()
        .map(|(name, count)| {
            format!(
                "{} {}",
                paint(colors, ColorSlot::ToolName, name),
                paint(colors, ColorSlot::ToolCount, &format!("×{}", count))
            )
        })
        .collect()
}

fn balanced(d: &ActiveToolsData, colors: Option<&ThemeColors>) -> String {
    if d.is_empty() {
        return String::new();
    }
    let mut parts = running_list(d, colors, "◐");
    parts.extend(completed_list(d, colors));
    parts.join(&separator(colors))
}

fn compact(d: &ActiveToolsData, colors: Option<&ThemeColors>) -> String {
    let running = d.running.len() as u64;
    let done = d.completed_total();
    join_nonzero(
        [
            (running, paint(colors, ColorSlot::ToolRunning, &format!("▶{}", running))),
            (done, paint(colors, ColorSlot::ToolCompleted, &format!("✓{}", done))),
        ],
        " ",
    )
}

fn playful(d: &ActiveToolsData, colors: Option<&ThemeColors>) -> String {
    if d.is_empty() {
        return String::new();
    }
    let mut parts = running_list(d, colors, "🔧");
    let done = d.completed_total();
    if done > 0 {
        parts.push(format!("✨ {}", paint(colors, ColorSlot::ToolCompleted, &done.to_string())));
    }
    parts.join(" ")
}

fn verbose(d: &ActiveToolsData, colors: Option<&ThemeColors>) -> String {
    let running = d.running.len() as u64;
    let done = d.completed_total();
    let mut summary = join_nonzero(
        [
            (
                running,
                paint(colors, ColorSlot::ToolRunning, &format!("{} running", pluralize(running, "tool", "tools"))),
            ),
            (
                done,
                paint(colors, ColorSlot::ToolCompleted, &format!("{} completed", pluralize(done, "call", "calls"))),
            ),
        ],
        ", ",
    );
    if !d.running.is_empty() {
        summary.push_str(&format!(" ({})", d.running.join(", ")));
    }
    summary
}

fn labeled_style(d: &ActiveToolsData, colors: Option<&ThemeColors>) -> String {
    let body = balanced(d, colors);
    if body.is_empty() {
        return body;
    }
    labeled(colors, "Tools", &body)
}

fn indicator_style(d: &ActiveToolsData, colors: Option<&ThemeColors>) -> String {
    let body = compact(d, colors);
    if body.is_empty() {
        return body;
    }
    let slot = if d.running.is_empty() {
        ColorSlot::ToolCompleted
    } else {
        ColorSlot::ToolRunning
    };
    indicator(colors, slot, &body)
}

static STYLES: StyleMap<ActiveToolsData> = StyleMap {
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

impl Styled for ActiveToolsData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
