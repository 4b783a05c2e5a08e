use std::collections::BTreeMap;

use super::{RenderContext, Widget};

/// Render widgets into the final status text.
///
/// Widgets are grouped by line and rendered in order; absent outputs are
/// dropped, a line with nothing left is dropped, and the remaining lines are
/// joined with `\n` in ascending line order.
pub fn compose<'a, I>(widgets: I, ctx: &RenderContext, separator: &str) -> String
where
    I: IntoIterator<Item = &'a Widget>,
{
    let mut lines: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for widget in widgets {
        if !widget.is_enabled() {
            continue;
        }
        if let Some(out) = widget.render(ctx) {
            lines.entry(widget.get_line()).or_default().push(out);
        }
    }

    lines
        .into_values()
        .filter(|parts| !parts.is_empty())
        .map(|parts| parts.join(separator))
        .collect::<Vec<_>>()
        .join("\n")
}
