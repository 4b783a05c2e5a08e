use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use super::{ToolUsage, ToolUsageProvider};

/// Reads tool activity from the session's JSONL transcript.
///
/// `tool_use` blocks in assistant messages start a call, `tool_result`
/// blocks in user messages finish it. Lines that are not JSON are skipped.
pub struct TranscriptReader;

impl ToolUsageProvider for TranscriptReader {
    fn tool_usage(&self, transcript: &Path) -> Option<ToolUsage> {
        let file = match File::open(transcript) {
            Ok(f) => f,
            Err(e) => {
                tracing::debug!("cannot open transcript {}: {}", transcript.display(), e);
                return None;
            }
        };
        Some(parse_transcript(BufReader::new(file)))
    }
}

/// Fold transcript lines into running and completed tool calls.
pub fn parse_transcript<R: BufRead>(reader: R) -> ToolUsage {
    // id -> tool name, in start order
    let mut started: Vec<(String, String)> = Vec::new();
    let mut finished: HashSet<String> = HashSet::new();

    // split on raw bytes so a line of invalid UTF-8 is skipped like bad JSON
    for line in reader.split(b'\n').map_while(Result::ok) {
        let entry: Value = match serde_json::from_slice(&line) {
            Ok(v) => v,
            Err(_) => continue,
        };

        let blocks = match entry.pointer("/message/content").and_then(Value::as_array) {
            Some(b) => b,
            None => continue,
        };

        for block in blocks {
            match block.get("type").and_then(Value::as_str) {
                Some("tool_use") => {
                    let id = block.get("id").and_then(Value::as_str);
                    let name = block.get("name").and_then(Value::as_str);
                    if let (Some(id), Some(name)) = (id, name) {
                        started.push((id.to_string(), name.to_string()));
                    }
                }
                Some("tool_result") => {
                    if let Some(id) = block.get("tool_use_id").and_then(Value::as_str) {
                        finished.insert(id.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    let mut usage = ToolUsage::default();
    let mut completed: BTreeMap<String, u64> = BTreeMap::new();
    for (id, name) in started {
        if finished.contains(&id) {
            *completed.entry(name).or_insert(0) += 1;
        } else {
            usage.running.push(name);
        }
    }
    usage.completed = completed;
    usage
}
