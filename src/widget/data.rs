//! Per-kind snapshots and their extraction from telemetry plus providers.

use std::path::Path;

use crate::providers::Providers;
use crate::style::{
    ActiveToolsData, CacheMetricsData, ConfigCountData, ContextData, CostData, DurationData,
    EmptyLineData, GitData, GitTagData, LinesData, ModelData, SystemMonitorData,
};
use crate::telemetry::{SessionTelemetry, TokenUsage};

use super::WidgetKind;

/// The render data of one widget, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetData {
    Model(ModelData),
    Context(ContextData),
    Cost(CostData),
    Duration(DurationData),
    Lines(LinesData),
    Git(GitData),
    GitTag(GitTagData),
    CacheMetrics(CacheMetricsData),
    ActiveTools(ActiveToolsData),
    ConfigCount(ConfigCountData),
    SystemMonitor(SystemMonitorData),
    EmptyLine(EmptyLineData),
}

impl WidgetData {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetData::Model(_) => WidgetKind::Model,
            WidgetData::Context(_) => WidgetKind::Context,
            WidgetData::Cost(_) => WidgetKind::Cost,
            WidgetData::Duration(_) => WidgetKind::Duration,
            WidgetData::Lines(_) => WidgetKind::Lines,
            WidgetData::Git(_) => WidgetKind::Git,
            WidgetData::GitTag(_) => WidgetKind::GitTag,
            WidgetData::CacheMetrics(_) => WidgetKind::CacheMetrics,
            WidgetData::ActiveTools(_) => WidgetKind::ActiveTools,
            WidgetData::ConfigCount(_) => WidgetKind::ConfigCount,
            WidgetData::SystemMonitor(_) => WidgetKind::SystemMonitor,
            WidgetData::EmptyLine(_) => WidgetKind::EmptyLine,
        }
    }
}

/// Build the snapshot for `kind`. `None` means the widget has nothing to show.
pub fn extract(
    kind: WidgetKind,
    telemetry: &SessionTelemetry,
    providers: &Providers,
) -> Option<WidgetData> {
    match kind {
        WidgetKind::Model => model(telemetry).map(WidgetData::Model),
        WidgetKind::Context => context(telemetry, providers).map(WidgetData::Context),
        WidgetKind::Cost => telemetry
            .cost
            .as_ref()
            .and_then(|c| c.total_cost_usd)
            .filter(|usd| usd.is_finite())
            .map(|usd| WidgetData::Cost(CostData { usd })),
        WidgetKind::Duration => {
            let cost = telemetry.cost.as_ref()?;
            cost.total_duration_ms.map(|total_ms| {
                WidgetData::Duration(DurationData {
                    total_ms,
                    api_ms: cost.total_api_duration_ms,
                })
            })
        }
        WidgetKind::Lines => {
            let cost = telemetry.cost.as_ref()?;
            if cost.total_lines_added.is_none() && cost.total_lines_removed.is_none() {
                return None;
            }
            Some(WidgetData::Lines(LinesData {
                added: cost.total_lines_added.unwrap_or(0),
                removed: cost.total_lines_removed.unwrap_or(0),
            }))
        }
        WidgetKind::Git => {
            let dir = Path::new(telemetry.working_dir()?);
            let branch = providers.git.branch(dir)?;
            Some(WidgetData::Git(GitData {
                branch,
                changes: providers.git.changes(dir),
            }))
        }
        WidgetKind::GitTag => {
            let dir = Path::new(telemetry.working_dir()?);
            providers
                .git
                .latest_tag(dir)
                .map(|tag| WidgetData::GitTag(GitTagData { tag }))
        }
        WidgetKind::CacheMetrics => effective_usage(telemetry, providers, false)
            .and_then(|usage| CacheMetricsData::from_usage(&usage))
            .map(WidgetData::CacheMetrics),
        WidgetKind::ActiveTools => {
            let transcript = telemetry
                .transcript_path
                .as_deref()
                .filter(|p| !p.is_empty())?;
            let usage = providers.tools.tool_usage(Path::new(transcript))?;
            Some(WidgetData::ActiveTools(ActiveToolsData {
                running: usage.running,
                completed: usage.completed,
            }))
        }
        WidgetKind::ConfigCount => {
            let counts = providers.config.counts(telemetry.project_dir().map(Path::new));
            if counts.is_empty() {
                return None;
            }
            Some(WidgetData::ConfigCount(ConfigCountData {
                claude_md: counts.claude_md,
                rules: counts.rules,
                mcps: counts.mcp_servers,
                hooks: counts.hooks,
            }))
        }
        WidgetKind::SystemMonitor => providers
            .system
            .snapshot()
            .map(|snap| WidgetData::SystemMonitor(SystemMonitorData::from_snapshot(&snap))),
        WidgetKind::EmptyLine => Some(WidgetData::EmptyLine(EmptyLineData)),
    }
}

fn model(telemetry: &SessionTelemetry) -> Option<ModelData> {
    let info = telemetry.model.as_ref()?;
    let id = info.id.clone().unwrap_or_default();
    let display_name = info
        .display_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| id.clone());
    if display_name.is_empty() {
        return None;
    }
    Some(ModelData { id, display_name })
}

fn context(telemetry: &SessionTelemetry, providers: &Providers) -> Option<ContextData> {
    let size = telemetry
        .context_window
        .as_ref()
        .and_then(|c| c.context_window_size)?;
    let usage = effective_usage(telemetry, providers, true)?;
    ContextData::new(usage.total(), size)
}

/// Live usage when the host sent real counts, else the cached copy for the
/// session. With `remember`, live usage is written back to the cache.
pub fn effective_usage(
    telemetry: &SessionTelemetry,
    providers: &Providers,
    remember: bool,
) -> Option<TokenUsage> {
    let live = telemetry.current_usage().filter(|u| !u.is_zero());
    let session = telemetry.session_id.as_deref().filter(|s| !s.is_empty());
    let cache = providers.cache.as_ref();

    match (live, session, cache) {
        (Some(usage), Some(id), Some(cache)) => {
            if remember {
                if let Err(e) = cache.set(id, usage) {
                    tracing::warn!(
                        "failed to cache usage for {} in {}: {}",
                        id,
                        cache.path().display(),
                        e
                    );
                }
            }
            Some(usage)
        }
        (Some(usage), _, _) => Some(usage),
        (None, Some(id), Some(cache)) => cache.get(id).map(|hit| {
            tracing::debug!("using cached usage for {} from {}", id, hit.timestamp);
            hit.usage
        }),
        (None, _, _) => None,
    }
}
