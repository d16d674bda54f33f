//! CLI error types.

use tourdoc_config::ConfigError;
use tourdoc_renderer::FrontMatterError;
use tourdoc_storage::StorageError;
use tourdoc_tour::TourError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Tour(#[from] TourError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    FrontMatter(#[from] FrontMatterError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}
