//! Error types for skill estimation and team balancing
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Structural failures are raised as [`BalancerError`]
//! variants and can be recovered with `downcast_ref`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific balancing scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BalancerError {
    #[error("Invalid {field}: expected {expected}, got {actual}")]
    Validation {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Cannot train a skill model on an empty training set")]
    EmptyTrainingSet,

    #[error("Skill model has not been fitted")]
    UnfittedModel,

    #[error("Cannot balance an empty roster")]
    EmptyRoster,

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl BalancerError {
    /// Build a validation error for a field whose length is wrong
    pub fn length_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::Validation {
            field: field.into(),
            expected: format!("length {}", expected),
            actual: format!("length {}", actual),
        }
    }
}
