use crate::config::{ScopeConfig, WidgetFlags};
use crate::error::ScopeError;
use crate::providers::Providers;
use crate::telemetry::SessionTelemetry;
use crate::theme::ThemeColors;

use super::{compose, RenderContext, Widget, WidgetKind};

/// Ordered set of widgets for one invocation.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: Vec<Widget>,
    flags: WidgetFlags,
}

impl WidgetRegistry {
    pub fn new(flags: WidgetFlags) -> Self {
        Self {
            widgets: Vec::new(),
            flags,
        }
    }

    /// Build and initialize every widget named in `config`, in line order.
    /// Unknown ids, flagged-off kinds and duplicates are skipped.
    pub fn from_config(config: &ScopeConfig, theme: Option<&ThemeColors>) -> Self {
        let mut registry = Self::new(config.flags);
        for (line, entries) in &config.lines {
            for entry in entries {
                let Some(kind) = WidgetKind::from_id(&entry.id) else {
                    tracing::warn!("{}", ScopeError::UnknownWidget(entry.id.clone()));
                    continue;
                };
                let mut widget = Widget::new(kind);
                widget.initialize(entry, Some(*line), theme);
                let meta = widget.metadata();
                tracing::trace!(
                    "{} v{} by {} ({}) on line {}",
                    meta.name,
                    meta.version,
                    meta.author,
                    meta.description,
                    widget.get_line()
                );
                match registry.register(widget) {
                    Ok(()) => {}
                    Err(e @ ScopeError::FeatureDisabled(_)) => tracing::debug!("skipping: {}", e),
                    Err(e) => tracing::warn!("skipping: {}", e),
                }
            }
        }
        registry
    }

    /// Add a widget at the end. Single-instance kinds reject a second widget
    /// with the same id.
    pub fn register(&mut self, widget: Widget) -> Result<(), ScopeError> {
        let kind = widget.kind();
        if !self.flags.allows(kind) {
            return Err(ScopeError::FeatureDisabled(kind));
        }
        if !kind.allows_multiple() && self.has(widget.id()) {
            return Err(ScopeError::DuplicateWidget(widget.id().to_string()));
        }
        self.widgets.push(widget);
        Ok(())
    }

    /// Remove every widget with `id`, disposing them. Returns how many went.
    pub fn unregister(&mut self, id: &str) -> Result<usize, ScopeError> {
        let before = self.widgets.len();
        let mut kept = Vec::with_capacity(before);
        for mut widget in self.widgets.drain(..) {
            if widget.id() == id {
                widget.cleanup();
            } else {
                kept.push(widget);
            }
        }
        self.widgets = kept;
        match before - self.widgets.len() {
            0 => Err(ScopeError::UnknownWidget(id.to_string())),
            removed => Ok(removed),
        }
    }

    /// First widget with `id`.
    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Every widget in insertion order.
    pub fn all(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter().filter(|w| w.is_enabled())
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Dispose and drop every widget.
    pub fn clear(&mut self) {
        for widget in &mut self.widgets {
            widget.cleanup();
        }
        self.widgets.clear();
    }

    pub fn update_all(&mut self, telemetry: &SessionTelemetry, providers: &Providers) {
        for widget in self.widgets.iter_mut().filter(|w| w.is_enabled()) {
            widget.update(telemetry, providers);
        }
    }

    pub fn render(&self, ctx: &RenderContext, separator: &str) -> String {
        compose(self.enabled(), ctx, separator)
    }
}
