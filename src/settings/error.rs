use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read config: {0}")]
    Read(String),

    #[error("cannot parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, SettingsError>;
