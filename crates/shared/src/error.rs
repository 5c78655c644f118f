//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation (bad amount, empty split, bad name...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g., duplicate participant).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Business rule violation (e.g., scoring after the match ended).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Local storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the process exit code for this error (BSD `sysexits` values).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Conflict(_) | Self::BusinessRule(_) => 65,
            Self::NotFound(_) => 66,
            Self::Storage(_) => 74,
            Self::Config(_) => 78,
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
