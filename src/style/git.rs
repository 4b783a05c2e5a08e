use super::{indicator, labeled, Style, StyleMap, Styled};
use crate::format::{join_nonzero, pluralize};
use crate::providers::GitChanges;
use crate::theme::{paint, ColorSlot, ThemeColors};

/// Branch plus optional working tree changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitData {
    pub branch: String,
    pub changes: Option<GitChanges>,
}

impl GitData {
    fn changes(&self) -> GitChanges {
        self.changes.unwrap_or_default()
    }
}

/// "+12 -3", zero parts dropped.
fn diff_summary(d: &GitData, colors: Option<&ThemeColors>) -> String {
    let c = d.changes();
    join_nonzero(
        [
            (
                c.insertions,
                paint(colors, ColorSlot::LinesAdded, &format!("+{}", c.insertions)),
            ),
            (
                c.deletions,
                paint(colors, ColorSlot::LinesRemoved, &format!("-{}", c.deletions)),
            ),
        ],
        " ",
    )
}

fn branch(d: &GitData, colors: Option<&ThemeColors>) -> String {
    paint(colors, ColorSlot::Branch, &d.branch)
}

fn balanced(d: &GitData, colors: Option<&ThemeColors>) -> String {
    let diff = diff_summary(d, colors);
    if diff.is_empty() {
        return branch(d, colors);
    }
    format!("{} [{}]", branch(d, colors), diff)
}

fn compact(d: &GitData, colors: Option<&ThemeColors>) -> String {
    branch(d, colors)
}

fn playful(d: &GitData, colors: Option<&ThemeColors>) -> String {
    let c = d.changes();
    let arrows = join_nonzero(
        [
            (
                c.insertions,
                paint(colors, ColorSlot::LinesAdded, &format!("⬆{}", c.insertions)),
            ),
            (
                c.deletions,
                paint(colors, ColorSlot::LinesRemoved, &format!("⬇{}", c.deletions)),
            ),
        ],
        " ",
    );
    if arrows.is_empty() {
        format!("🔀 {}", branch(d, colors))
    } else {
        format!("🔀 {} {}", branch(d, colors), arrows)
    }
}

fn verbose(d: &GitData, colors: Option<&ThemeColors>) -> String {
    let c = d.changes();
    let head = format!("branch: {}", branch(d, colors));
    let detail = join_nonzero(
        [
            (c.files, pluralize(c.files, "file changed", "files changed")),
            (c.insertions, pluralize(c.insertions, "insertion", "insertions")),
            (c.deletions, pluralize(c.deletions, "deletion", "deletions")),
        ],
        ", ",
    );
    if detail.is_empty() {
        return head;
    }
    format!("{} | {}", head, paint(colors, ColorSlot::Changes, &detail))
}

fn labeled_style(d: &GitData, colors: Option<&ThemeColors>) -> String {
    labeled(colors, "Git", &balanced(d, colors))
}

fn indicator_style(d: &GitData, colors: Option<&ThemeColors>) -> String {
    indicator(colors, ColorSlot::Branch, &balanced(d, colors))
}

fn fancy(d: &GitData, colors: Option<&ThemeColors>) -> String {
    let diff = diff_summary(d, colors);
    let head = format!("⟨{}⟩", branch(d, colors));
    if diff.is_empty() {
        head
    } else {
        format!("{} {}", head, diff)
    }
}

static STYLES: StyleMap<GitData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Compact, compact),
        (Style::Playful, playful),
        (Style::Verbose, verbose),
        (Style::Labeled, labeled_style),
        (Style::Indicator, indicator_style),
        (Style::Fancy, fancy),
    ],
};

impl Styled for GitData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
