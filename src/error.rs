/// Error types for storage access and settings validation
use thiserror::Error;

/// A single field failed validation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("invalid URL: {0:?}")]
    Url(String),

    #[error("invalid redirect delay: {0:?}")]
    RedirectDelay(String),

    #[error("invalid background color: {0:?}")]
    BackgroundColor(String),
}

/// Failure reported by the settings store
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The host storage API rejected the call
    #[error("storage error: {0}")]
    Host(String),

    /// The stored record could not be converted to or from JS
    #[error("failed to decode settings: {0}")]
    Decode(String),
}
