use thiserror::Error;

use crate::capture::error::CaptureError;
use crate::composite::error::CompositeError;
use crate::frame::error::FrameError;
use crate::settings::error::SettingsError;

/// Errors surfaced by the booth controls.
#[derive(Debug, Error)]
pub enum BoothError {
    #[error("camera access denied: {0}")]
    CaptureDenied(String),

    #[error("no session started")]
    NoSession,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("final card failed: {0}")]
    Composite(#[from] CompositeError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("print failed: {0}")]
    Print(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, BoothError>;
