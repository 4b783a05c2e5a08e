//! Deterministic providers for `preview` and tests.

use std::collections::BTreeMap;
use std::path::Path;

use super::{
    ConfigCountProvider, ConfigCounts, GitChanges, GitProvider, SystemProvider, SystemSnapshot,
    ToolUsage, ToolUsageProvider,
};

#[derive(Debug, Clone)]
pub struct MockGit {
    pub branch: Option<String>,
    pub changes: Option<GitChanges>,
    pub tag: Option<String>,
}

impl Default for MockGit {
    fn default() -> Self {
        Self {
            branch: Some("main".to_string()),
            changes: Some(GitChanges {
                files: 3,
                insertions: 42,
                deletions: 7,
            }),
            tag: Some("v1.2.0".to_string()),
        }
    }
}

impl GitProvider for MockGit {
    fn branch(&self, _dir: &Path) -> Option<String> {
        self.branch.clone()
    }

    fn changes(&self, _dir: &Path) -> Option<GitChanges> {
        self.changes
    }

    fn latest_tag(&self, _dir: &Path) -> Option<String> {
        self.tag.clone()
    }
}

#[derive(Debug, Clone)]
pub struct MockTools {
    pub usage: Option<ToolUsage>,
}

impl Default for MockTools {
    fn default() -> Self {
        let mut completed = BTreeMap::new();
        completed.insert("Read".to_string(), 5);
        completed.insert("Edit".to_string(), 2);
        completed.insert("Grep".to_string(), 1);
        Self {
            usage: Some(ToolUsage {
                running: vec!["Bash".to_string()],
                completed,
            }),
        }
    }
}

impl ToolUsageProvider for MockTools {
    fn tool_usage(&self, _transcript: &Path) -> Option<ToolUsage> {
        self.usage.clone()
    }
}

#[derive(Debug, Clone)]
pub struct MockConfigCounts {
    pub counts: ConfigCounts,
}

impl Default for MockConfigCounts {
    fn default() -> Self {
        Self {
            counts: ConfigCounts {
                claude_md: 1,
                rules: 3,
                mcp_servers: 2,
                hooks: 4,
            },
        }
    }
}

impl ConfigCountProvider for MockConfigCounts {
    fn counts(&self, _project_dir: Option<&Path>) -> ConfigCounts {
        self.counts
    }
}

#[derive(Debug, Clone)]
pub struct MockSystem {
    pub snapshot: Option<SystemSnapshot>,
}

impl Default for MockSystem {
    fn default() -> Self {
        Self {
            snapshot: Some(SystemSnapshot {
                load_1m: 1.5,
                cpu_count: 8,
                memory_used_bytes: 6 * 1024 * 1024 * 1024,
                memory_total_bytes: 16 * 1024 * 1024 * 1024,
            }),
        }
    }
}

impl SystemProvider for MockSystem {
    fn snapshot(&self) -> Option<SystemSnapshot> {
        self.snapshot
    }
}
