pub mod schema;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::{default_lines, CacheSettings, ScopeConfig, WidgetEntry, WidgetFlags};

/// Overrides the config file location (used by tests).
pub const CONFIG_ENV: &str = "CLAUDE_SCOPE_CONFIG";

/// Overrides the cache file location (used by tests).
pub const CACHE_ENV: &str = "CLAUDE_SCOPE_CACHE";

/// `~/.claude-scope`.
pub fn scope_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|d| d.join(".claude-scope"))
        .ok_or_else(|| anyhow::anyhow!("could not determine home directory"))
}

/// Resolve the config path: explicit flag, then `CLAUDE_SCOPE_CONFIG`, then
/// `~/.claude-scope/config.json`.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = env_path(CONFIG_ENV) {
        return Ok(p);
    }
    Ok(scope_dir()?.join("config.json"))
}

/// Resolve the cache path: `CLAUDE_SCOPE_CACHE`, then the config's
/// `cache.path`, then `~/.claude-scope/cache.json`.
pub fn cache_path(config: &ScopeConfig) -> Result<PathBuf> {
    if let Some(p) = env_path(CACHE_ENV) {
        return Ok(p);
    }
    if let Some(p) = config.cache.path.as_deref().filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    Ok(scope_dir()?.join("cache.json"))
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Load the config at `path`. A missing file is silently the default; an
/// unreadable or malformed one is the default with a warning.
pub fn load(path: &Path) -> ScopeConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", path.display());
            return ScopeConfig::default();
        }
        Err(e) => {
            tracing::warn!("cannot read config {}: {}", path.display(), e);
            return ScopeConfig::default();
        }
    };

    match serde_json::from_str::<ScopeConfig>(&contents) {
        Ok(config) => {
            if config.version != schema::CONFIG_VERSION {
                tracing::debug!(
                    "config version {} differs from {}",
                    config.version,
                    schema::CONFIG_VERSION
                );
            }
            config
        }
        Err(e) => {
            tracing::warn!("invalid config {}: {}; using defaults", path.display(), e);
            ScopeConfig::default()
        }
    }
}

/// Write `config` as pretty JSON, creating parent directories.
pub fn save(config: &ScopeConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = load(&dir.path().join("absent.json"));
        assert_eq!(config, ScopeConfig::default());
    }

    #[test]
    fn test_malformed_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load(&path), ScopeConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = ScopeConfig {
            theme: "dracula".to_string(),
            ..Default::default()
        };
        save(&config, &path).unwrap();
        assert_eq!(load(&path), config);
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/explicit.json");
        assert_eq!(config_path(Some(&explicit)).unwrap(), explicit);
    }

    #[test]
    fn test_cache_path_from_config() {
        if std::env::var_os(CACHE_ENV).is_some() {
            return;
        }
        let config = ScopeConfig {
            cache: CacheSettings {
                path: Some("/tmp/scope-cache.json".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            cache_path(&config).unwrap(),
            PathBuf::from("/tmp/scope-cache.json")
        );
    }
}
