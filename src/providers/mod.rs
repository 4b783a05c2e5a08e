//! Data sources that sit outside the telemetry document.
//!
//! Each concern is a trait with a production implementation that touches
//! the outside world and a deterministic mock used by `preview` and tests.
//! Providers never fail loudly: any error becomes `None` (or zero counts)
//! and the widget that asked renders nothing.

pub mod config_count;
pub mod git;
pub mod mock;
pub mod system;
pub mod transcript;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::cache::UsageCache;

pub use config_count::FsConfigCounter;
pub use git::CliGit;
pub use system::ProcSystem;
pub use transcript::TranscriptReader;

/// Working tree changes relative to HEAD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GitChanges {
    pub files: u64,
    pub insertions: u64,
    pub deletions: u64,
}

pub trait GitProvider {
    /// Current branch, or a short commit hash when HEAD is detached.
    fn branch(&self, dir: &Path) -> Option<String>;

    fn changes(&self, dir: &Path) -> Option<GitChanges>;

    /// Most recent tag reachable from HEAD.
    fn latest_tag(&self, dir: &Path) -> Option<String>;
}

/// Tool activity recovered from a session transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolUsage {
    /// Tools started but not yet answered, in start order.
    pub running: Vec<String>,
    /// Finished calls per tool name.
    pub completed: BTreeMap<String, u64>,
}

pub trait ToolUsageProvider {
    fn tool_usage(&self, transcript: &Path) -> Option<ToolUsage>;
}

/// How much Claude configuration is in effect for a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigCounts {
    pub claude_md: u64,
    pub rules: u64,
    pub mcp_servers: u64,
    pub hooks: u64,
}

impl ConfigCounts {
    pub fn is_empty(&self) -> bool {
        self.claude_md == 0 && self.rules == 0 && self.mcp_servers == 0 && self.hooks == 0
    }
}

pub trait ConfigCountProvider {
    fn counts(&self, project_dir: Option<&Path>) -> ConfigCounts;
}

/// Point-in-time machine load.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SystemSnapshot {
    pub load_1m: f64,
    pub cpu_count: usize,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
}

impl SystemSnapshot {
    pub fn memory_percent(&self) -> f64 {
        if self.memory_total_bytes == 0 {
            return 0.0;
        }
        self.memory_used_bytes as f64 / self.memory_total_bytes as f64 * 100.0
    }

    /// 1-minute load as a share of available cores.
    pub fn load_percent(&self) -> f64 {
        if self.cpu_count == 0 {
            return 0.0;
        }
        self.load_1m / self.cpu_count as f64 * 100.0
    }
}

pub trait SystemProvider {
    fn snapshot(&self) -> Option<SystemSnapshot>;
}

/// Everything widgets may consult while extracting their data.
pub struct Providers {
    pub git: Box<dyn GitProvider>,
    pub tools: Box<dyn ToolUsageProvider>,
    pub config: Box<dyn ConfigCountProvider>,
    pub system: Box<dyn SystemProvider>,
    pub cache: Option<UsageCache>,
}

impl Providers {
    /// Real providers for a live render.
    pub fn production(git_timeout: Duration, cache: Option<UsageCache>) -> Self {
        Self {
            git: Box::new(CliGit::new(git_timeout)),
            tools: Box::new(TranscriptReader),
            config: Box::new(FsConfigCounter::new(dirs::home_dir())),
            system: Box::new(ProcSystem),
            cache,
        }
    }

    /// Fixed values for preview and tests. No cache.
    pub fn mock() -> Self {
        Self {
            git: Box::new(mock::MockGit::default()),
            tools: Box::new(mock::MockTools::default()),
            config: Box::new(mock::MockConfigCounts::default()),
            system: Box::new(mock::MockSystem::default()),
            cache: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_percent() {
        let snap = SystemSnapshot {
            load_1m: 2.0,
            cpu_count: 8,
            memory_used_bytes: 4,
            memory_total_bytes: 16,
        };
        assert!((snap.memory_percent() - 25.0).abs() < f64::EPSILON);
        assert!((snap.load_percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_totals_do_not_divide() {
        let snap = SystemSnapshot::default();
        assert_eq!(snap.memory_percent(), 0.0);
        assert_eq!(snap.load_percent(), 0.0);
    }

    #[test]
    fn test_config_counts_is_empty() {
        assert!(ConfigCounts::default().is_empty());
        assert!(!ConfigCounts {
            hooks: 1,
            ..Default::default()
        }
        .is_empty());
    }
}
