pub mod output;
pub mod preview;
pub mod quick_config;
pub mod statusline;
pub mod themes;

use clap::{Parser, Subcommand};

/// Configurable multi-line statusline for Claude Code sessions
#[derive(Parser)]
#[command(name = "claude-scope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub render: statusline::Args,

    /// Logging verbosity for stderr: off, error, warn, info, debug, trace
    #[arg(long, global = true, env = "CLAUDE_SCOPE_LOG")]
    pub log_level: Option<String>,

    /// Without a subcommand, read session JSON on stdin and print the statusline
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a config file from a layout preset
    QuickConfig(quick_config::Args),

    /// Render the configured layout from sample data
    Preview(preview::Args),

    /// List available color themes
    Themes,
}
