use std::collections::BTreeMap;

use colored::Color;

use super::{ColorSlot, Theme, ThemeColors};

/// Theme used for empty or unknown names and for slot fallback.
pub const DEFAULT_THEME: &str = "gray";

/// Base colors a theme is derived from.
struct Palette {
    text: Color,
    muted: Color,
    red: Color,
    green: Color,
    yellow: Color,
    blue: Color,
    magenta: Color,
    cyan: Color,
    orange: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::TrueColor { r, g, b }
}

const GRAY: Palette = Palette {
    text: Color::White,
    muted: Color::BrightBlack,
    red: Color::Red,
    green: Color::Green,
    yellow: Color::Yellow,
    blue: Color::Blue,
    magenta: Color::Magenta,
    cyan: Color::Cyan,
    orange: Color::BrightYellow,
};

const CATPPUCCIN_MOCHA: Palette = Palette {
    text: rgb(205, 214, 244),
    muted: rgb(108, 112, 134),
    red: rgb(243, 139, 168),
    green: rgb(166, 227, 161),
    yellow: rgb(249, 226, 175),
    blue: rgb(137, 180, 250),
    magenta: rgb(203, 166, 247),
    cyan: rgb(148, 226, 213),
    orange: rgb(250, 179, 135),
};

const DRACULA: Palette = Palette {
    text: rgb(248, 248, 242),
    muted: rgb(98, 114, 164),
    red: rgb(255, 85, 85),
    green: rgb(80, 250, 123),
    yellow: rgb(241, 250, 140),
    blue: rgb(189, 147, 249),
    magenta: rgb(255, 121, 198),
    cyan: rgb(139, 233, 253),
    orange: rgb(255, 184, 108),
};

const NORD: Palette = Palette {
    text: rgb(216, 222, 233),
    muted: rgb(76, 86, 106),
    red: rgb(191, 97, 106),
    green: rgb(163, 190, 140),
    yellow: rgb(235, 203, 139),
    blue: rgb(129, 161, 193),
    magenta: rgb(180, 142, 173),
    cyan: rgb(136, 192, 208),
    orange: rgb(208, 135, 112),
};

const GRUVBOX: Palette = Palette {
    text: rgb(235, 219, 178),
    muted: rgb(146, 131, 116),
    red: rgb(251, 73, 52),
    green: rgb(184, 187, 38),
    yellow: rgb(250, 189, 47),
    blue: rgb(131, 165, 152),
    magenta: rgb(211, 134, 155),
    cyan: rgb(142, 192, 124),
    orange: rgb(254, 128, 25),
};

const TOKYO_NIGHT: Palette = Palette {
    text: rgb(192, 202, 245),
    muted: rgb(86, 95, 137),
    red: rgb(247, 118, 142),
    green: rgb(158, 206, 106),
    yellow: rgb(224, 175, 104),
    blue: rgb(122, 162, 247),
    magenta: rgb(187, 154, 247),
    cyan: rgb(125, 207, 255),
    orange: rgb(255, 158, 100),
};

const ONE_DARK: Palette = Palette {
    text: rgb(171, 178, 191),
    muted: rgb(92, 99, 112),
    red: rgb(224, 108, 117),
    green: rgb(152, 195, 121),
    yellow: rgb(229, 192, 123),
    blue: rgb(97, 175, 239),
    magenta: rgb(198, 120, 221),
    cyan: rgb(86, 182, 194),
    orange: rgb(209, 154, 102),
};

const ROSE_PINE: Palette = Palette {
    text: rgb(224, 222, 244),
    muted: rgb(110, 106, 134),
    red: rgb(235, 111, 146),
    green: rgb(49, 116, 143),
    yellow: rgb(246, 193, 119),
    blue: rgb(156, 207, 216),
    magenta: rgb(196, 167, 231),
    cyan: rgb(156, 207, 216),
    orange: rgb(234, 154, 151),
};

const MONOKAI: Palette = Palette {
    text: rgb(248, 248, 242),
    muted: rgb(117, 113, 94),
    red: rgb(249, 38, 114),
    green: rgb(166, 226, 46),
    yellow: rgb(230, 219, 116),
    blue: rgb(102, 217, 239),
    magenta: rgb(174, 129, 255),
    cyan: rgb(102, 217, 239),
    orange: rgb(253, 151, 31),
};

const SOLARIZED_DARK: Palette = Palette {
    text: rgb(131, 148, 150),
    muted: rgb(88, 110, 117),
    red: rgb(220, 50, 47),
    green: rgb(133, 153, 0),
    yellow: rgb(181, 137, 0),
    blue: rgb(38, 139, 210),
    magenta: rgb(108, 113, 196),
    cyan: rgb(42, 161, 152),
    orange: rgb(203, 75, 22),
};

struct ThemeSpec {
    name: &'static str,
    description: &'static str,
    palette: &'static Palette,
    /// Older palettes predate the system monitor slots.
    system_slots: bool,
}

const THEMES: &[ThemeSpec] = &[
    ThemeSpec {
        name: "gray",
        description: "Neutral 16-color palette that works on any terminal",
        palette: &GRAY,
        system_slots: true,
    },
    ThemeSpec {
        name: "catppuccin-mocha",
        description: "Soft pastels on a dark base",
        palette: &CATPPUCCIN_MOCHA,
        system_slots: true,
    },
    ThemeSpec {
        name: "dracula",
        description: "High-contrast purple and pink",
        palette: &DRACULA,
        system_slots: true,
    },
    ThemeSpec {
        name: "nord",
        description: "Arctic blues",
        palette: &NORD,
        system_slots: true,
    },
    ThemeSpec {
        name: "gruvbox",
        description: "Retro warm earth tones",
        palette: &GRUVBOX,
        system_slots: true,
    },
    ThemeSpec {
        name: "tokyo-night",
        description: "Neon city lights",
        palette: &TOKYO_NIGHT,
        system_slots: true,
    },
    ThemeSpec {
        name: "one-dark",
        description: "Atom's classic dark scheme",
        palette: &ONE_DARK,
        system_slots: true,
    },
    ThemeSpec {
        name: "rose-pine",
        description: "Muted roses and pines",
        palette: &ROSE_PINE,
        system_slots: true,
    },
    ThemeSpec {
        name: "monokai",
        description: "Vivid editor classic",
        palette: &MONOKAI,
        system_slots: false,
    },
    ThemeSpec {
        name: "solarized-dark",
        description: "Precision low-contrast dark",
        palette: &SOLARIZED_DARK,
        system_slots: false,
    },
];

fn build(p: &Palette, system_slots: bool) -> ThemeColors {
    let mut slots = BTreeMap::new();
    let mut set = |slot, color| {
        slots.insert(slot, color);
    };

    set(ColorSlot::Text, p.text);
    set(ColorSlot::Muted, p.muted);
    set(ColorSlot::Label, p.muted);
    set(ColorSlot::Separator, p.muted);
    set(ColorSlot::Model, p.magenta);
    set(ColorSlot::Duration, p.cyan);
    set(ColorSlot::Cost, p.orange);
    set(ColorSlot::LinesAdded, p.green);
    set(ColorSlot::LinesRemoved, p.red);
    set(ColorSlot::Branch, p.blue);
    set(ColorSlot::Changes, p.yellow);
    set(ColorSlot::Tag, p.magenta);
    set(ColorSlot::ContextLow, p.green);
    set(ColorSlot::ContextMedium, p.yellow);
    set(ColorSlot::ContextHigh, p.red);
    set(ColorSlot::CacheHigh, p.green);
    set(ColorSlot::CacheMedium, p.yellow);
    set(ColorSlot::CacheLow, p.red);
    set(ColorSlot::CacheRead, p.cyan);
    set(ColorSlot::CacheWrite, p.orange);
    set(ColorSlot::ToolRunning, p.yellow);
    set(ColorSlot::ToolCompleted, p.green);
    set(ColorSlot::ToolName, p.blue);
    set(ColorSlot::ToolCount, p.muted);
    set(ColorSlot::ConfigCount, p.cyan);
    set(ColorSlot::ConfigLabel, p.muted);

    if system_slots {
        set(ColorSlot::SystemCpu, p.blue);
        set(ColorSlot::SystemMemory, p.magenta);
        set(ColorSlot::SystemHigh, p.red);
    }

    ThemeColors::new(slots)
}

fn to_theme(spec: &ThemeSpec) -> Theme {
    Theme {
        name: spec.name,
        description: spec.description,
        colors: build(spec.palette, spec.system_slots),
    }
}

/// Color of `slot` in the neutral gray theme.
pub(crate) fn neutral(slot: ColorSlot) -> Color {
    match slot {
        ColorSlot::Text => GRAY.text,
        ColorSlot::ContextLow | ColorSlot::CacheHigh | ColorSlot::LinesAdded => GRAY.green,
        ColorSlot::ContextMedium | ColorSlot::CacheMedium | ColorSlot::ToolRunning => GRAY.yellow,
        ColorSlot::ContextHigh
        | ColorSlot::CacheLow
        | ColorSlot::LinesRemoved
        | ColorSlot::SystemHigh => GRAY.red,
        _ => GRAY.muted,
    }
}

/// Every built-in theme, default first.
pub fn all_themes() -> Vec<Theme> {
    THEMES.iter().map(to_theme).collect()
}

/// Look up a theme by name (case-insensitive). Empty or unknown names
/// resolve to [`DEFAULT_THEME`].
pub fn get_theme_by_name(name: &str) -> Theme {
    let wanted = name.trim().to_ascii_lowercase();
    THEMES
        .iter()
        .find(|spec| spec.name == wanted)
        .or_else(|| THEMES.iter().find(|spec| spec.name == DEFAULT_THEME))
        .map(to_theme)
        .unwrap_or_else(|| Theme {
            name: DEFAULT_THEME,
            description: "",
            colors: build(&GRAY, true),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_resolves_to_default() {
        assert_eq!(get_theme_by_name("nonexistent").name, DEFAULT_THEME);
        assert_eq!(get_theme_by_name("").name, DEFAULT_THEME);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(get_theme_by_name("  Dracula ").name, "dracula");
    }

    #[test]
    fn test_theme_names_unique() {
        let themes = all_themes();
        let mut names: Vec<_> = themes.iter().map(|t| t.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), themes.len());
        assert_eq!(themes[0].name, DEFAULT_THEME);
    }

    #[test]
    fn test_default_theme_defines_every_slot() {
        let theme = get_theme_by_name(DEFAULT_THEME);
        for slot in ColorSlot::ALL {
            assert!(theme.colors.defines(*slot), "gray is missing {}", slot);
        }
    }

    #[test]
    fn test_older_theme_falls_back_for_system_slots() {
        let theme = get_theme_by_name("monokai");
        assert!(!theme.colors.defines(ColorSlot::SystemCpu));
        assert_eq!(theme.colors.get(ColorSlot::SystemCpu), GRAY.muted);
        assert_eq!(theme.colors.get(ColorSlot::SystemHigh), GRAY.red);
    }

    #[test]
    fn test_medium_context_tier_is_yellow_in_gray() {
        let theme = get_theme_by_name(DEFAULT_THEME);
        assert_eq!(theme.colors.get(ColorSlot::ContextMedium), Color::Yellow);
    }
}
