use anyhow::Result;
use clap::Args as ClapArgs;

use super::{output, statusline};
use crate::providers::Providers;
use crate::style::Style;
use crate::telemetry::{
    ContextWindow, CostInfo, ModelInfo, SessionTelemetry, TokenUsage, Workspace,
};
use crate::theme::all_themes;

/// Arguments for the `claude-scope preview` subcommand.
#[derive(ClapArgs)]
pub struct Args {
    /// Render every widget with this style instead of the configured ones
    #[arg(long)]
    pub style: Option<Style>,

    /// Theme name, overriding the config file
    #[arg(long)]
    pub theme: Option<String>,
}

pub fn run(args: Args, render: &statusline::Args) -> Result<()> {
    let mut config = statusline::load_config(render);

    if let Some(style) = args.style {
        for entry in config.lines.values_mut().flatten() {
            entry.style = style;
        }
    }

    let mut render = render.clone();
    if let Some(theme) = args.theme {
        if !all_themes().iter().any(|t| t.name.eq_ignore_ascii_case(theme.trim())) {
            output::warning(&format!("unknown theme '{}', using the default", theme));
        }
        render.theme = Some(theme);
    }

    let text = statusline::render(&sample_telemetry(), &config, &render, &Providers::mock());
    println!("{}", text);
    Ok(())
}

/// Fixed session data used for previews.
pub fn sample_telemetry() -> SessionTelemetry {
    SessionTelemetry {
        session_id: Some("preview".to_string()),
        cwd: Some("/workspace/demo".to_string()),
        transcript_path: Some("/workspace/demo/transcript.jsonl".to_string()),
        model: Some(ModelInfo {
            id: Some("claude-opus-4-5".to_string()),
            display_name: Some("Claude Opus 4.5".to_string()),
        }),
        workspace: Some(Workspace {
            current_dir: Some("/workspace/demo".to_string()),
            project_dir: Some("/workspace/demo".to_string()),
        }),
        version: Some("2.0.0".to_string()),
        cost: Some(CostInfo {
            total_cost_usd: Some(0.42),
            total_duration_ms: Some(3_665_000),
            total_api_duration_ms: Some(120_000),
            total_lines_added: Some(142),
            total_lines_removed: Some(27),
        }),
        context_window: Some(ContextWindow {
            total_input_tokens: Some(250_000),
            total_output_tokens: Some(18_000),
            context_window_size: Some(200_000),
            current_usage: Some(TokenUsage {
                input_tokens: 20_000,
                output_tokens: 6_000,
                cache_creation_input_tokens: 10_000,
                cache_read_input_tokens: 90_000,
            }),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScopeConfig;

    #[test]
    fn test_sample_renders_three_lines() {
        let args = statusline::Args {
            no_color: true,
            ..Default::default()
        };
        let text = statusline::render(
            &sample_telemetry(),
            &ScopeConfig::default(),
            &args,
            &Providers::mock(),
        );
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Claude Opus 4.5"));
        assert!(lines[0].contains("63%"));
        assert_eq!(lines[1], "main [+42 -7] v1.2.0 75% cache");
        assert!(lines[2].starts_with("◐ Bash"));
    }
}
