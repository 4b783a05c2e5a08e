use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{ConfigCountProvider, ConfigCounts};

/// Rules directories deeper than this are not scanned.
const MAX_RULE_DEPTH: usize = 4;

/// Counts CLAUDE.md files, rules, MCP servers and hooks on disk.
pub struct FsConfigCounter {
    home: Option<PathBuf>,
}

impl FsConfigCounter {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    fn claude_md_candidates(&self, project: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = &self.home {
            paths.push(home.join(".claude").join("CLAUDE.md"));
        }
        if let Some(project) = project {
            paths.push(project.join("CLAUDE.md"));
            paths.push(project.join("CLAUDE.local.md"));
            paths.push(project.join(".claude").join("CLAUDE.md"));
        }
        paths
    }

    fn rules_dirs(&self, project: Option<&Path>) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(home) = &self.home {
            dirs.push(home.join(".claude").join("rules"));
        }
        if let Some(project) = project {
            dirs.push(project.join(".claude").join("rules"));
        }
        dirs
    }

    fn mcp_files(&self, project: Option<&Path>) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if let Some(home) = &self.home {
            files.push(home.join(".claude.json"));
        }
        if let Some(project) = project {
            files.push(project.join(".mcp.json"));
        }
        files
    }

    fn settings_files(&self, project: Option<&Path>) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if let Some(home) = &self.home {
            files.push(home.join(".claude").join("settings.json"));
        }
        if let Some(project) = project {
            files.push(project.join(".claude").join("settings.json"));
            files.push(project.join(".claude").join("settings.local.json"));
        }
        files
    }
}

impl ConfigCountProvider for FsConfigCounter {
    fn counts(&self, project_dir: Option<&Path>) -> ConfigCounts {
        let claude_md = self
            .claude_md_candidates(project_dir)
            .iter()
            .filter(|p| p.is_file())
            .count() as u64;

        let rules = self
            .rules_dirs(project_dir)
            .iter()
            .map(|d| count_markdown(d, 0))
            .sum();

        // the same server configured twice counts once
        let mut servers = BTreeSet::new();
        for file in self.mcp_files(project_dir) {
            if let Some(json) = read_json(&file) {
                if let Some(map) = json.get("mcpServers").and_then(Value::as_object) {
                    servers.extend(map.keys().cloned());
                }
            }
        }

        let hooks = self
            .settings_files(project_dir)
            .iter()
            .filter_map(|f| read_json(f))
            .map(|json| count_hooks(&json))
            .sum();

        ConfigCounts {
            claude_md,
            rules,
            mcp_servers: servers.len() as u64,
            hooks,
        }
    }
}

fn read_json(path: &Path) -> Option<Value> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!("skipping unparseable {}: {}", path.display(), e);
            None
        }
    }
}

fn count_markdown(dir: &Path, depth: usize) -> u64 {
    if depth > MAX_RULE_DEPTH {
        return 0;
    }
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return 0,
    };

    let mut count = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            count += count_markdown(&path, depth + 1);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            count += 1;
        }
    }
    count
}

/// Count hook commands in a settings document:
/// `{"hooks": {"Event": [{"matcher": "...", "hooks": [{...}, ...]}]}}`.
/// A matcher group without an inner list counts as one hook.
fn count_hooks(settings: &Value) -> u64 {
    let events = match settings.get("hooks").and_then(Value::as_object) {
        Some(e) => e,
        None => return 0,
    };

    events
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .map(|group| match group.get("hooks").and_then(Value::as_array) {
            Some(inner) => inner.len() as u64,
            None => 1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_counts_project_and_home() {
        let home = tempfile::TempDir::new().unwrap();
        let project = tempfile::TempDir::new().unwrap();
        let h = home.path();
        let p = project.path();

        write(&h.join(".claude/CLAUDE.md"), "# global");
        write(&p.join("CLAUDE.md"), "# project");
        write(&p.join(".claude/rules/style.md"), "rule");
        write(&p.join(".claude/rules/nested/naming.md"), "rule");
        write(&p.join(".claude/rules/notes.txt"), "not a rule");
        write(
            &h.join(".claude.json"),
            r#"{"mcpServers": {"github": {}, "fs": {}}}"#,
        );
        write(&p.join(".mcp.json"), r#"{"mcpServers": {"fs": {}, "db": {}}}"#);
        write(
            &p.join(".claude/settings.json"),
            r#"{"hooks": {
                "PreToolUse": [{"matcher": "Bash", "hooks": [{"type": "command"}, {"type": "command"}]}],
                "Stop": [{"type": "command"}]
            }}"#,
        );

        let counter = FsConfigCounter::new(Some(h.to_path_buf()));
        let counts = counter.counts(Some(p));
        assert_eq!(
            counts,
            ConfigCounts {
                claude_md: 2,
                rules: 2,
                mcp_servers: 3,
                hooks: 3,
            }
        );
    }

    #[test]
    fn test_nothing_configured() {
        let project = tempfile::TempDir::new().unwrap();
        let counter = FsConfigCounter::new(None);
        assert!(counter.counts(Some(project.path())).is_empty());
        assert!(counter.counts(None).is_empty());
    }

    #[test]
    fn test_invalid_settings_are_skipped() {
        let project = tempfile::TempDir::new().unwrap();
        write(&project.path().join(".claude/settings.json"), "{oops");
        let counter = FsConfigCounter::new(None);
        assert_eq!(counter.counts(Some(project.path())).hooks, 0);
    }
}
