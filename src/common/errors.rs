use thiserror::Error;

/// Typed errors for CloudSweep operations.
/// We use `anyhow` at the CLI top level, but the engine reports failures
/// through this enum so callers can tell a bad request from a dead backend.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Malformed request — rejected before any I/O
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Backend cannot be reached at all; aborts the whole operation
    #[error("backend unavailable: {resource}. {hint}")]
    BackendUnavailable { resource: String, hint: String },

    /// A single file's content could not be fetched; recovered per-file
    #[error("content unavailable for '{path}': {message}")]
    ContentUnavailable { path: String, message: String },

    /// A single image could not be decoded; recovered per-file
    #[error("failed to decode image '{path}': {message}")]
    DecodeError { path: String, message: String },

    /// The method has no direct fingerprint (combined is a post-processing step)
    #[error("method '{0}' has no direct fingerprint")]
    UnsupportedMethod(String),

    /// Path does not exist on the backend
    #[error("not found: {0}")]
    NotFound(String),

    /// Local filesystem failure
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SweepError>;
