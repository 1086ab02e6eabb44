//! Typed errors for the question generation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during question generation and storage.
///
/// Per-round and per-item failures inside the pipeline are absorbed
/// locally and never surface here. The only fatal generation error is
/// [`GenerateError::NotConfigured`], raised before any round executes.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No generation service configured and synthetic-only mode not enabled
    #[error("no generation service configured and synthetic-only mode is disabled")]
    NotConfigured,

    /// Generation service unavailable or failed
    #[error("generation service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Quiz not found in store
    #[error("quiz not found: {id}")]
    QuizNotFound { id: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl GenerateError {
    /// Wrap an arbitrary error as a service failure.
    pub fn service(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Service(Box::new(err))
    }

    /// Wrap an arbitrary error as a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
