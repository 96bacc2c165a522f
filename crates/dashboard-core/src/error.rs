// File: crates/dashboard-core/src/error.rs
// Summary: Error type for the fallible boundaries (parsing models, colors, options).

use thiserror::Error;

/// Errors raised while loading models or configuration.
///
/// The transform pipeline itself never fails: empty or degenerate input
/// produces empty output instead.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid color '{0}': expected #rgb, #rrggbb or #aarrggbb")]
    InvalidColor(String),

    #[error("unknown chart type '{0}'")]
    UnknownChartType(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("invalid display options: {0}")]
    InvalidOptions(String),

    #[error("failed to parse dashboard JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse display options: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
