// Ubermap Error Types
// Tagged error taxonomy shared by the acquirer, translator and event loop

/// Result type for core operations
pub type MapperResult<T> = Result<T, MapperError>;

/// Errors produced by the core.
///
/// Only `Integrity` and `TryAgain` are recoverable; the event loop skips or
/// retries on those and returns everything else to the caller.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Malformed input event: {0}")]
    Integrity(String),

    #[error("Resource temporarily unavailable, try again")]
    TryAgain,
}

impl MapperError {
    /// Whether the event loop may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MapperError::Integrity(_) | MapperError::TryAgain)
    }
}
