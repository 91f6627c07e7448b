use thiserror::Error;

/// Compositing errors. Photo-level decode failures never surface here; they
/// degrade the output instead.
#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("frame not loaded")]
    FrameNotLoaded,

    #[error("drawing surface unavailable: {0}")]
    Surface(String),

    #[error("draw failed: {0}")]
    Draw(String),

    #[error("encoding failed: {0}")]
    Encode(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CompositeError>;
