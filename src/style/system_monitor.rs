use super::{indicator, separator, Style, StyleMap, Styled};
use crate::providers::SystemSnapshot;
use crate::theme::{paint, ColorSlot, ThemeColors};

/// Usage at or above this percentage is painted in the high slot.
const HIGH_USAGE_PERCENT: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemMonitorData {
    pub load_1m: f64,
    /// Load as a share of cores, 0-100.
    pub cpu_percent: u8,
    pub memory_percent: u8,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
}

impl SystemMonitorData {
    pub fn from_snapshot(snap: &SystemSnapshot) -> Self {
        let pct = |v: f64| v.round().clamp(0.0, 100.0) as u8;
        Self {
            load_1m: snap.load_1m,
            cpu_percent: pct(snap.load_percent()),
            memory_percent: pct(snap.memory_percent()),
            memory_used_bytes: snap.memory_used_bytes,
            memory_total_bytes: snap.memory_total_bytes,
        }
    }

    fn slot(percent: u8, normal: ColorSlot) -> ColorSlot {
        if percent >= HIGH_USAGE_PERCENT {
            ColorSlot::SystemHigh
        } else {
            normal
        }
    }

    fn cpu(&self, colors: Option<&ThemeColors>) -> String {
        let slot = Self::slot(self.cpu_percent, ColorSlot::SystemCpu);
        paint(colors, slot, &format!("{}%", self.cpu_percent))
    }

    fn memory(&self, colors: Option<&ThemeColors>) -> String {
        let slot = Self::slot(self.memory_percent, ColorSlot::SystemMemory);
        paint(colors, slot, &format!("{}%", self.memory_percent))
    }
}

fn gib(bytes: u64) -> String {
    format!("{:.1}G", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

fn balanced(d: &SystemMonitorData, colors: Option<&ThemeColors>) -> String {
    format!("CPU {}{}MEM {}", d.cpu(colors), separator(colors), d.memory(colors))
}

fn compact(d: &SystemMonitorData, colors: Option<&ThemeColors>) -> String {
    format!("C{} M{}", d.cpu(colors), d.memory(colors))
}

fn verbose(d: &SystemMonitorData, colors: Option<&ThemeColors>) -> String {
    format!(
        "load {:.2} ({}){}memory {}/{} ({})",
        d.load_1m,
        d.cpu(colors),
        separator(colors),
        gib(d.memory_used_bytes),
        gib(d.memory_total_bytes),
        d.memory(colors)
    )
}

fn technical(d: &SystemMonitorData, colors: Option<&ThemeColors>) -> String {
    format!(
        "load1={:.2} mem={}/{}",
        d.load_1m,
        paint(colors, ColorSlot::SystemMemory, &d.memory_used_bytes.to_string()),
        d.memory_total_bytes
    )
}

fn indicator_style(d: &SystemMonitorData, colors: Option<&ThemeColors>) -> String {
    let worst = d.cpu_percent.max(d.memory_percent);
    let slot = SystemMonitorData::slot(worst, ColorSlot::SystemCpu);
    indicator(colors, slot, &compact(d, colors))
}

static STYLES: StyleMap<SystemMonitorData> = StyleMap {
    default: Style::Balanced,
    entries: &[
        (Style::Balanced, balanced),
        (Style::Compact, compact),
        (Style::Verbose, verbose),
        (Style::Technical, technical),
        (Style::Indicator, indicator_style),
    ],
};

impl Styled for SystemMonitorData {
    fn style_map() -> &'static StyleMap<Self> {
        &STYLES
    }
}
