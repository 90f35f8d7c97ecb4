//! Engine error type.
//!
//! Convention violations are scan output, not errors; this type only covers
//! configuration and export failures.

/// Errors raised while loading configuration or exporting results.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// Failed to read or write a file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize JSON.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration is structurally valid JSON but unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}
