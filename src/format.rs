//! Number, duration and cost formatting shared by the style tables.

/// Default bar width used by the primary context renderer.
pub const PROGRESS_BAR_WIDTH: usize = 20;

/// Narrower bar used by the style variants.
pub const STYLE_BAR_WIDTH: usize = 10;

const BAR_FILLED: char = '█';
const BAR_EMPTY: char = '░';

/// Abbreviate a token count (e.g. 1500 -> "1.5k", 10500 -> "11k").
///
/// One decimal below 10k with a trailing ".0" dropped, whole units above.
/// Millions use the same rule with an "M" suffix.
pub fn format_k(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();

    if abs < 1000 {
        return format!("{}{}", sign, abs);
    }

    let (scaled, suffix) = if abs < 1_000_000 {
        (abs as f64 / 1000.0, "k")
    } else {
        (abs as f64 / 1_000_000.0, "M")
    };

    let body = if scaled < 10.0 {
        let fixed = format!("{:.1}", scaled);
        fixed.strip_suffix(".0").map(str::to_string).unwrap_or(fixed)
    } else {
        format!("{}", scaled.round() as u64)
    };

    format!("{}{}{}", sign, body, suffix)
}

/// [`format_k`] for unsigned token counts; counts past `i64::MAX` saturate.
pub fn format_k_tokens(tokens: u64) -> String {
    format_k(i64::try_from(tokens).unwrap_or(i64::MAX))
}

/// Floor-divided thousands with an uppercase "K" (e.g. 45230 -> "45K").
pub fn format_k_floor(tokens: u64) -> String {
    if tokens < 1000 {
        return tokens.to_string();
    }
    format!("{}K", tokens / 1000)
}

/// Format milliseconds as "45s", "1m 5s" or "1h 1m 5s".
pub fn format_duration(ms: u64) -> String {
    let total = ms / 1000;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Format milliseconds without spaces or seconds once past a minute ("1h1m").
pub fn format_duration_compact(ms: u64) -> String {
    let total = ms / 1000;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{}h{}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", total)
    }
}

/// Fixed two-decimal USD (e.g. "$0.42").
pub fn format_cost_usd(cost: f64) -> String {
    format!("${:.2}", cost)
}

/// Tiered-precision USD: 4 decimals under one cent, none from $100 up.
pub fn format_cost_tiered(cost: f64) -> String {
    if cost < 0.01 {
        format!("${:.4}", cost)
    } else if cost >= 100.0 {
        format!("${:.0}", cost)
    } else {
        format!("${:.2}", cost)
    }
}

/// Render a block progress bar of `width` cells for `percent` (0-100).
pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(width - filled));
    bar
}

/// "1 hook" / "2 hooks". Only an exact count of one takes the singular.
pub fn pluralize(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Join the labels of every non-zero component. All zeros yield "".
pub fn join_nonzero<I>(parts: I, separator: &str) -> String
where
    I: IntoIterator<Item = (u64, String)>,
{
    parts
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(_, text)| text)
        .collect::<Vec<_>>()
        .join(separator)
}
