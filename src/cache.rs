//! Last-known token usage per session, persisted as one flat JSON file.
//!
//! The host omits `current_usage` while tools run, which would make the
//! context widget blink out. The last non-zero usage is remembered here and
//! substituted until it expires.
//!
//! Reads and writes are whole-file. Two invocations racing on the file can
//! lose an update; the statusline runs one invocation at a time in practice.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::ScopeError;
use crate::telemetry::TokenUsage;

pub const DEFAULT_EXPIRY_MS: u64 = 5 * 60 * 1000;

const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    #[serde(default)]
    sessions: BTreeMap<String, CacheEntry>,
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            sessions: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    timestamp: u64,
    usage: TokenUsage,
}

/// A cache hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedUsage {
    pub session_id: String,
    pub timestamp: u64,
    pub usage: TokenUsage,
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct UsageCache {
    path: PathBuf,
    expiry_ms: u64,
}

impl UsageCache {
    pub fn new(path: impl Into<PathBuf>, expiry_ms: u64) -> Self {
        Self {
            path: path.into(),
            expiry_ms,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, session_id: &str) -> Option<CachedUsage> {
        self.get_at(session_id, now_ms())
    }

    /// Look up `session_id` as of `now` (ms). Expired entries are misses.
    pub fn get_at(&self, session_id: &str, now: u64) -> Option<CachedUsage> {
        let file = self.load();
        let entry = file.sessions.get(session_id)?;
        if self.is_expired(entry, now) {
            tracing::debug!("cached usage for {} expired", session_id);
            if let Err(e) = self.prune_at(now) {
                tracing::warn!("failed to prune cache {}: {}", self.path.display(), e);
            }
            return None;
        }
        Some(CachedUsage {
            session_id: session_id.to_string(),
            timestamp: entry.timestamp,
            usage: entry.usage,
        })
    }

    pub fn set(&self, session_id: &str, usage: TokenUsage) -> Result<(), ScopeError> {
        self.set_at(session_id, usage, now_ms())
    }

    /// Store `usage` stamped with `now`, dropping expired entries on the way.
    pub fn set_at(&self, session_id: &str, usage: TokenUsage, now: u64) -> Result<(), ScopeError> {
        let mut file = self.load();
        file.sessions.retain(|_, e| !self.is_expired(e, now));
        file.sessions.insert(
            session_id.to_string(),
            CacheEntry {
                timestamp: now,
                usage,
            },
        );
        self.save(&file)
    }

    /// Remove every expired entry. Returns how many were dropped.
    pub fn prune_at(&self, now: u64) -> Result<usize, ScopeError> {
        let mut file = self.load();
        let before = file.sessions.len();
        file.sessions.retain(|_, e| !self.is_expired(e, now));
        let removed = before - file.sessions.len();
        if removed > 0 {
            self.save(&file)?;
        }
        Ok(removed)
    }

    fn is_expired(&self, entry: &CacheEntry, now: u64) -> bool {
        now.saturating_sub(entry.timestamp) > self.expiry_ms
    }

    /// Missing, unreadable or foreign-version files all read as empty.
    fn load(&self) -> CacheFile {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("cannot read cache {}: {}", self.path.display(), e);
                }
                return CacheFile::default();
            }
        };

        match serde_json::from_str::<CacheFile>(&contents) {
            Ok(file) if file.version == CACHE_VERSION => file,
            Ok(file) => {
                tracing::warn!("ignoring cache with unsupported version {}", file.version);
                CacheFile::default()
            }
            Err(e) => {
                tracing::warn!("ignoring corrupt cache {}: {}", self.path.display(), e);
                CacheFile::default()
            }
        }
    }

    /// Write through a sibling temp file so readers never see half a file.
    fn save(&self, file: &CacheFile) -> Result<(), ScopeError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
