use thiserror::Error;

/// Frame template loading errors. All of them are terminal.
#[derive(Debug, Clone, Error)]
pub enum FrameError {
    #[error("frame fetch failed: {0}")]
    Fetch(String),

    #[error("frame decode failed: {0}")]
    Decode(String),

    #[error("frame unavailable: {0}")]
    Unavailable(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, FrameError>;
