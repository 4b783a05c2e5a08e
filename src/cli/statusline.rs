use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args as ClapArgs;

use crate::cache::{now_ms, UsageCache};
use crate::config::{self, ScopeConfig};
use crate::providers::Providers;
use crate::telemetry::SessionTelemetry;
use crate::theme::{get_theme_by_name, ThemeColors};
use crate::widget::{RenderContext, WidgetRegistry};

// ---------------------------------------------------------------------------
// Clap Args
// ---------------------------------------------------------------------------

/// Render flags shared by the default command and `preview`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct Args {
    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,

    /// Override terminal width (default: $COLUMNS or 80)
    #[arg(long)]
    pub width: Option<u16>,

    /// Theme name, overriding the config file
    #[arg(long)]
    pub theme: Option<String>,

    /// Config file path (default: ~/.claude-scope/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Colors are off with --no-color or when NO_COLOR is set.
    pub fn colors_disabled(&self) -> bool {
        self.no_color || std::env::var_os("NO_COLOR").is_some()
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Entry point. Wraps `run_inner` in `catch_unwind` so a panic anywhere in
/// rendering still leaves the host with a (blank) line. Unreadable stdin is
/// returned as an error.
pub fn run(args: Args) -> Result<()> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run_inner(&args)));

    match result {
        Ok(inner) => inner,
        Err(_) => {
            tracing::error!("statusline panicked; printing an empty line");
            println!();
            Ok(())
        }
    }
}

fn run_inner(args: &Args) -> Result<()> {
    // 1. Parse stdin (fatal on empty or invalid JSON)
    let telemetry = SessionTelemetry::from_stdin()?;

    // 2. Load config (warning fallback to defaults)
    let config = load_config(args);

    // 3. Wire providers, including the usage cache
    let providers = Providers::production(
        Duration::from_millis(config.git_timeout_ms),
        open_cache(&config),
    );

    // 4. Render and print
    let text = render(&telemetry, &config, args, &providers);
    println!("{}", text);

    Ok(())
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

/// Load the config named by --config, `CLAUDE_SCOPE_CONFIG`, or the default path.
pub fn load_config(args: &Args) -> ScopeConfig {
    match config::config_path(args.config.as_deref()) {
        Ok(path) => config::load(&path),
        Err(e) => {
            tracing::warn!("{}; using default config", e);
            ScopeConfig::default()
        }
    }
}

fn open_cache(config: &ScopeConfig) -> Option<UsageCache> {
    match config::cache_path(config) {
        Ok(path) => Some(UsageCache::new(path, config.cache.expiry_ms)),
        Err(e) => {
            tracing::warn!("usage cache disabled: {}", e);
            None
        }
    }
}

/// Theme colors for this run, or `None` when colors are disabled.
pub fn resolve_colors(args: &Args, config: &ScopeConfig) -> Option<ThemeColors> {
    if args.colors_disabled() {
        return None;
    }
    let name = args.theme.as_deref().unwrap_or(&config.theme);
    Some(get_theme_by_name(name).colors)
}

/// Determine rendering width from args, $COLUMNS, or fallback of 80.
pub fn resolve_width(args_width: Option<u16>) -> u16 {
    if let Some(w) = args_width {
        return w;
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(w) = cols.parse::<u16>() {
            if w > 0 {
                return w;
            }
        }
    }

    80
}

/// Build the registry from `config`, feed it, and compose the status text.
pub fn render(
    telemetry: &SessionTelemetry,
    config: &ScopeConfig,
    args: &Args,
    providers: &Providers,
) -> String {
    let colors = resolve_colors(args, config);
    let mut registry = WidgetRegistry::from_config(config, colors.as_ref());
    tracing::debug!("{} widgets registered", registry.len());

    registry.update_all(telemetry, providers);

    let ctx = RenderContext {
        width: resolve_width(args.width),
        timestamp: now_ms(),
    };
    let text = registry.render(&ctx, &config.separator);
    registry.clear();
    text
}
