//! Error types for the MealMate core library.

use thiserror::Error;

/// Failure talking to the external recipe catalog.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network failure, timeout, or a non-success HTTP status.
    #[error("recipe catalog unavailable: {0}")]
    Unavailable(String),
    /// The catalog has no recipe for the requested id.
    #[error("recipe not found in catalog")]
    NotFound,
}

/// Error type for all core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Missing or malformed input field.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },
    /// Record absent, or present but owned by another user.
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: i64 },
    /// External recipe catalog failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl CoreError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn not_found(what: &'static str, id: i64) -> Self {
        Self::NotFound { what, id }
    }

    /// True for errors the caller should surface as user input problems.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
