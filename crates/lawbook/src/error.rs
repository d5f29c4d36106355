//! CLI error types.

use lawbook_config::ConfigError;
use lawbook_intake::IntakeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Intake(#[from] IntakeError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("Check failed with {errors} error(s) and {warnings} warning(s)")]
    CheckFailed { errors: usize, warnings: usize },

    #[error("{0}")]
    Validation(String),
}
