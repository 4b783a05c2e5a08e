use super::{indicator, separator, Style, StyleMap, Styled};
use crate::format::{join_nonzero, pluralize};
use crate::theme::{paint, ColorSlot, ThemeColors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigCountData {
    pub claude_md: u64,
    pub rules: u64,
    pub mcps: u64,
    pub hooks: u64,
}

fn pair(colors: Option<&ThemeColors>, label: &str, count: u64) -> String {
    format!(
        "{}{}",
        paint(colors, ColorSlot::ConfigLabel, &format!("{}:", label)),
        paint(colors, ColorSlot::ConfigCount, &count.to_string())
    )
}

fn balanced(d: &ConfigCountData, colors: Option<&ThemeColors>) -> String {
    join_nonzero(
        [
            (d.claude_md, pair(colors, "CLAUDE.md", d.claude_md)),
            (d.rules, pair(colors, "rules", d.rules)),
            (d.mcps, pair(colors, "MCPs", d.mcps)),
            (d.hooks, pair(colors, "hooks", d.hooks)),
        ],
        &separator(colors),
    )
}

fn compact(d: &ConfigCountData, colors: Option<&ThemeColors>) -> String {
    let icon = |glyph: &str, count: u64| {
        format!("{}{}", glyph, paint(colors, ColorSlot::ConfigCount, &count.to_string()))
    };
    join_nonzero(
        [
            (d.claude_md, icon("📄", d.claude_md)),
            (d.rules, icon("📜", d.rules)),
            (d.mcps, icon("🔌", d.mcps)),
            (d.hooks, icon("🪝", d.hooks)),
        ],
        " ",
    )
}

fn verbose(d: &ConfigCountData, colors: Option<&ThemeColors>) -> String {
    let text = join_nonzero(
        [
            (d.claude_md, pluralize(d.claude_md, "CLAUDE.md", "CLAUDE.md")),
            (d.rules, pluralize(d.rules, "rule", "rules")),
            (d.mcps, pluralize(d.mcps, "MCP server", "MCP servers")),
            (d.hooks, pluralize(d.hooks, "hook", "hooks")),
        ],
        ", ",
    );
    paint(colors, ColorSlot::ConfigCount, &text)
}

fn indicator_style(d: &ConfigCountData, colors: Option<&ThemeColors>) -> String {
    let body = compact(d, colors);
    if body.is_empty() {
        return body;
    }
    indicator(colors, ColorSlot::ConfigCount, &body)
}

static STYLES: StyleMap<ConfigCountData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Compact, compact),
        (Style::Verbose, verbose),
        (Style::Indicator, indicator_style),
    ],
};

impl Styled for ConfigCountData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ConfigCountData {
        ConfigCountData {
            claude_md: 1,
            rules: 3,
            mcps: 2,
            hooks: 4,
        }
    }

    #[test]
    fn test_styles() {
        let d = data();
        let r = |s| d.render_style(s, None).unwrap();
        assert_eq!(r(Style::Balanced), "CLAUDE.md:1 │ rules:3 │ MCPs:2 │ hooks:4");
        assert_eq!(r(Style::Compact), "📄1 📜3 🔌2 🪝4");
        assert_eq!(r(Style::Verbose), "1 CLAUDE.md, 3 rules, 2 MCP servers, 4 hooks");
        assert_eq!(r(Style::Indicator), "● 📄1 📜3 🔌2 🪝4");
    }

    #[test]
    fn test_zero_counts_are_suppressed() {
        let d = ConfigCountData {
            hooks: 1,
            ..Default::default()
        };
        assert_eq!(d.render_style(Style::Balanced, None).unwrap(), "hooks:1");
        assert_eq!(d.render_style(Style::Verbose, None).unwrap(), "1 hook");

        let none = ConfigCountData::default();
        assert_eq!(none.render_style(Style::Balanced, None).unwrap(), "");
        assert_eq!(none.render_style(Style::Indicator, None).unwrap(), "");
    }
}
