use thiserror::Error;

use crate::widget::WidgetKind;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("widget '{0}' is already registered")]
    DuplicateWidget(String),

    #[error("widget '{0}' is disabled by feature flags")]
    FeatureDisabled(WidgetKind),

    #[error("unknown widget id: {0}")]
    UnknownWidget(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("provider timed out after {0}ms")]
    Timeout(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
