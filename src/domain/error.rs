use std::io;

use thiserror::Error;

use super::identities::{ModuleId, PathwayId};

/// Library-wide error type for pathwise operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Stored document could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// Pathway does not exist or is not owned by the requesting learner.
    #[error("Pathway {0} not found")]
    PathwayNotFound(PathwayId),

    /// Module does not exist or is not owned by the requesting learner.
    #[error("Module {0} not found")]
    ModuleNotFound(ModuleId),

    /// Action targeted a module other than the pathway's active module.
    #[error("Module {} is not active (active module: {})", .module, describe_active(.active))]
    ModuleNotActive { module: ModuleId, active: Option<ModuleId> },

    /// Attempt to complete a module that is already complete.
    #[error("Module {0} is already completed")]
    ModuleAlreadyCompleted(ModuleId),

    /// Certificate requested for a pathway with incomplete modules.
    #[error("Pathway {pathway} is not yet complete ({remaining} module(s) remaining)")]
    PathwayIncomplete { pathway: PathwayId, remaining: usize },

    /// Outline generation failed; no pathway was created.
    #[error("Could not generate a learning pathway: {0}. Please try again.")]
    OutlineUnavailable(String),

    /// Learner identifier is invalid.
    #[error("Invalid learner identifier '{0}': use letters, digits, '-', '_', '.' or '@'")]
    InvalidLearnerId(String),

    /// Learner-supplied input is invalid.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store lock could not be acquired in time.
    #[error("Timed out waiting for store lock: {0}")]
    LockTimeout(String),

    /// External service call failed.
    #[error("{service} request failed: {message}")]
    Upstream { service: String, message: String, status: Option<u16> },

    /// Template rendering failed.
    #[error("Failed to render {template}: {details}")]
    TemplateRender { template: String, details: String },

    /// Unexpected internal condition.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn describe_active(active: &Option<ModuleId>) -> String {
    match active {
        Some(id) => id.to_string(),
        None => "none, pathway complete".to_string(),
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn upstream<S: Into<String>, M: Into<String>>(
        service: S,
        message: M,
        status: Option<u16>,
    ) -> Self {
        AppError::Upstream { service: service.into(), message: message.into(), status }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Json(_)
            | AppError::TomlParse(_)
            | AppError::Configuration(_)
            | AppError::InvalidConfig(_)
            | AppError::InvalidLearnerId(_)
            | AppError::InvalidInput(_) => io::ErrorKind::InvalidInput,
            AppError::EnvironmentVariableMissing(_)
            | AppError::PathwayNotFound(_)
            | AppError::ModuleNotFound(_) => io::ErrorKind::NotFound,
            AppError::ModuleNotActive { .. }
            | AppError::ModuleAlreadyCompleted(_)
            | AppError::PathwayIncomplete { .. } => io::ErrorKind::PermissionDenied,
            AppError::LockTimeout(_) => io::ErrorKind::TimedOut,
            AppError::OutlineUnavailable(_)
            | AppError::Upstream { .. }
            | AppError::TemplateRender { .. }
            | AppError::Internal(_) => io::ErrorKind::Other,
        }
    }

    /// Whether this error reflects a progression invariant violation (acting on
    /// the wrong module) rather than bad input or infrastructure trouble.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, AppError::ModuleNotActive { .. } | AppError::ModuleAlreadyCompleted(_))
    }
}
