mod cache;
mod cli;
mod config;
mod error;
mod format;
mod providers;
mod style;
mod telemetry;
mod theme;
mod widget;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    // stdout is a pipe under the host, so colors are decided here
    colored::control::set_override(!cli.render.colors_disabled());

    match cli.command {
        None => cli::statusline::run(cli.render),
        Some(Command::QuickConfig(args)) => cli::quick_config::run(args, &cli.render),
        Some(Command::Preview(args)) => cli::preview::run(args, &cli.render),
        Some(Command::Themes) => cli::themes::run(),
    }
}

/// Logs go to stderr; stdout carries the statusline.
fn init_tracing(level: Option<&str>) {
    let filter = match level.map(str::trim) {
        None | Some("") => "warn",
        Some("off") => "off",
        Some("error") => "error",
        Some("warn") => "warn",
        Some("info") => "info",
        Some("debug") => "debug",
        Some("trace") => "trace",
        Some(other) => {
            eprintln!("warning: unknown log level '{}', defaulting to 'warn'", other);
            "warn"
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
