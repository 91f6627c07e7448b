use thiserror::Error;

/// Capture subsystem errors.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera access denied: {0}")]
    AccessDenied(String),

    #[error("capture stream is not active")]
    StreamStopped,

    #[error("frame grab failed: {0}")]
    Grab(String),

    #[error("photo encoding failed: {0}")]
    Encode(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CaptureError>;
