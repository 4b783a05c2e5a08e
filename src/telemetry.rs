//! Session telemetry piped on stdin by the host on every statusline tick.
//!
//! Every field is optional at the serde level, and a field of the wrong type
//! reads as absent. A document that is not a JSON object is fatal; anything
//! else is accepted and the widgets whose fields are missing render nothing.

use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Upper bound on how much stdin we are willing to buffer.
const MAX_STDIN_BYTES: u64 = 1024 * 1024;

/// Deserialize a field, reading a value of the wrong shape as the default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionTelemetry {
    #[serde(deserialize_with = "lenient")]
    pub session_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cwd: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub transcript_path: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub model: Option<ModelInfo>,
    #[serde(deserialize_with = "lenient")]
    pub workspace: Option<Workspace>,
    #[serde(deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cost: Option<CostInfo>,
    #[serde(deserialize_with = "lenient")]
    pub context_window: Option<ContextWindow>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelInfo {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Workspace {
    #[serde(deserialize_with = "lenient")]
    pub current_dir: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub project_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CostInfo {
    #[serde(deserialize_with = "lenient")]
    pub total_cost_usd: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub total_duration_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub total_api_duration_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub total_lines_added: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub total_lines_removed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContextWindow {
    #[serde(deserialize_with = "lenient")]
    pub total_input_tokens: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub total_output_tokens: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub context_window_size: Option<u64>,
    /// Absent or `null` between turns and while tools run.
    #[serde(deserialize_with = "lenient")]
    pub current_usage: Option<TokenUsage>,
}

/// Token counts for the latest API call. Also the cached payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenUsage {
    #[serde(deserialize_with = "lenient")]
    pub input_tokens: u64,
    #[serde(deserialize_with = "lenient")]
    pub output_tokens: u64,
    #[serde(deserialize_with = "lenient")]
    pub cache_creation_input_tokens: u64,
    #[serde(deserialize_with = "lenient")]
    pub cache_read_input_tokens: u64,
}

impl TokenUsage {
    /// Every token occupying the context window.
    pub fn total(&self) -> u64 {
        self.total_input().saturating_add(self.output_tokens)
    }

    /// Prompt-side tokens (fresh input plus both cache buckets).
    pub fn total_input(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.cache_creation_input_tokens)
            .saturating_add(self.cache_read_input_tokens)
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

impl SessionTelemetry {
    /// Parse a telemetry document. Fails only on empty input, invalid JSON
    /// or a top-level value that is not an object.
    pub fn from_json(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            bail!("no session telemetry on stdin");
        }
        let value: Value =
            serde_json::from_str(input).context("stdin is not a valid session telemetry document")?;
        if !value.is_object() {
            bail!("stdin is not a valid session telemetry document: expected a JSON object");
        }
        serde_json::from_value(value).context("stdin is not a valid session telemetry document")
    }

    /// Read and parse telemetry from stdin.
    pub fn from_stdin() -> Result<Self> {
        let mut buf = String::new();
        std::io::stdin()
            .lock()
            .take(MAX_STDIN_BYTES)
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Self::from_json(&buf)
    }

    /// Live token usage for the current turn, if the host sent any.
    pub fn current_usage(&self) -> Option<TokenUsage> {
        self.context_window.as_ref().and_then(|c| c.current_usage)
    }

    /// Directory widgets should inspect: workspace dir, then cwd.
    pub fn working_dir(&self) -> Option<&str> {
        self.workspace
            .as_ref()
            .and_then(|w| w.current_dir.as_deref())
            .or(self.cwd.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// Project root for config scanning: project dir, then working dir.
    pub fn project_dir(&self) -> Option<&str> {
        self.workspace
            .as_ref()
            .and_then(|w| w.project_dir.as_deref())
            .filter(|d| !d.is_empty())
            .or_else(|| self.working_dir())
    }
}
