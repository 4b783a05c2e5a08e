use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::{GitChanges, GitProvider};
use crate::error::ScopeError;

/// Queries git by shelling out, each call bounded by a timeout.
pub struct CliGit {
    binary: Option<PathBuf>,
    timeout: Duration,
    runtime: Option<tokio::runtime::Runtime>,
}

impl CliGit {
    pub fn new(timeout: Duration) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| tracing::warn!("cannot start runtime for git queries: {}", e))
            .ok();

        Self {
            binary: which::which("git").ok(),
            timeout,
            runtime,
        }
    }

    /// Run `git <args>` in `dir` and return trimmed stdout.
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String, ScopeError> {
        let binary = self
            .binary
            .as_ref()
            .ok_or_else(|| ScopeError::Provider("git not found on PATH".to_string()))?;
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| ScopeError::Provider("no runtime for git queries".to_string()))?;

        let mut cmd = Command::new(binary);
        cmd.args(args)
            .current_dir(dir)
            // Never take the index lock from a prompt.
            .env("GIT_OPTIONAL_LOCKS", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let timeout = self.timeout;
        let output = runtime.block_on(async move {
            let child = match cmd.spawn() {
                Ok(child) => child,
                Err(e) => return Err(ScopeError::Io(e)),
            };
            match tokio::time::timeout(timeout, child.wait_with_output()).await {
                Ok(result) => result.map_err(ScopeError::from),
                // the child is killed on drop
                Err(_) => Err(ScopeError::Timeout(timeout.as_millis() as u64)),
            }
        })?;

        if !output.status.success() {
            return Err(ScopeError::Provider(format!(
                "git {} exited with {}",
                args.join(" "),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn query(&self, dir: &Path, args: &[&str]) -> Option<String> {
        match self.run(dir, args) {
            Ok(out) if !out.is_empty() => Some(out),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("git {}: {}", args.join(" "), e);
                None
            }
        }
    }
}

impl GitProvider for CliGit {
    fn branch(&self, dir: &Path) -> Option<String> {
        let branch = self.query(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        if branch == "HEAD" {
            return self.query(dir, &["rev-parse", "--short", "HEAD"]);
        }
        Some(branch)
    }

    fn changes(&self, dir: &Path) -> Option<GitChanges> {
        // An empty shortstat on a healthy repo means a clean tree.
        match self.run(dir, &["diff", "--shortstat", "HEAD"]) {
            Ok(out) => Some(parse_shortstat(&out)),
            Err(e) => {
                tracing::debug!("git diff --shortstat: {}", e);
                None
            }
        }
    }

    fn latest_tag(&self, dir: &Path) -> Option<String> {
        self.query(dir, &["describe", "--tags", "--abbrev=0"])
    }
}

/// Parse `git diff --shortstat` output, e.g.
/// ` 3 files changed, 12 insertions(+), 3 deletions(-)`.
pub fn parse_shortstat(line: &str) -> GitChanges {
    let mut changes = GitChanges::default();
    for clause in line.split(',') {
        let mut words = clause.split_whitespace();
        let count = match words.next().and_then(|n| n.parse::<u64>().ok()) {
            Some(n) => n,
            None => continue,
        };
        match words.next() {
            Some(w) if w.starts_with("file") => changes.files = count,
            Some(w) if w.starts_with("insertion") => changes.insertions = count,
            Some(w) if w.starts_with("deletion") => changes.deletions = count,
            _ => {}
        }
    }
    changes
}
