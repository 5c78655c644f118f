//! Expense-splitting error types.
//!
//! The pure calculators never fail; these errors come from validated
//! construction of expenses and from session edits.

use rust_decimal::Decimal;
use thiserror::Error;
use yoanoto_shared::AppError;
use yoanoto_shared::types::ExpenseId;

/// Errors that can occur while building expenses or editing a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    // ========== Expense Errors ==========
    /// Expense amount must be strictly positive.
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Expense must be split among at least one participant.
    #[error("Expense must be split among at least one participant")]
    EmptySplit,

    /// Expense not found in the session.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    // ========== Participant Errors ==========
    /// Participant name is blank.
    #[error("Participant name cannot be empty")]
    EmptyName,

    /// Participant name exceeds the configured length.
    #[error("Participant name '{name}' is longer than {max} characters")]
    NameTooLong {
        /// The rejected name.
        name: String,
        /// Maximum allowed characters.
        max: usize,
    },

    /// Participant already on the roster.
    #[error("Participant '{0}' is already in the group")]
    DuplicateParticipant(String),

    /// Name does not belong to the roster.
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    // ========== Alias Errors ==========
    /// Payment alias exceeds the allowed length.
    #[error("Payment alias is longer than {max} characters")]
    AliasTooLong {
        /// Maximum allowed characters.
        max: usize,
    },
}

impl SplitError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::EmptySplit => "EMPTY_SPLIT",
            Self::ExpenseNotFound(_) => "EXPENSE_NOT_FOUND",
            Self::EmptyName => "EMPTY_NAME",
            Self::NameTooLong { .. } => "NAME_TOO_LONG",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            Self::AliasTooLong { .. } => "ALIAS_TOO_LONG",
        }
    }
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        match err {
            SplitError::ExpenseNotFound(_) | SplitError::UnknownParticipant(_) => {
                Self::NotFound(err.to_string())
            }
            SplitError::DuplicateParticipant(_) => Self::Conflict(err.to_string()),
            SplitError::NonPositiveAmount(_)
            | SplitError::EmptySplit
            | SplitError::EmptyName
            | SplitError::NameTooLong { .. }
            | SplitError::AliasTooLong { .. } => Self::Validation(err.to_string()),
        }
    }
}
