use std::path::Path;

use crate::settings::error::{Result, SettingsError};
use crate::settings::types::BoothConfig;

/// Load the booth configuration from a JSON file.
///
/// A missing file yields the defaults; an unreadable or malformed one is an
/// error rather than a silent fallback.
pub fn load(path: &Path) -> Result<BoothConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(BoothConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::Read(format!("{}: {e}", path.display())))?;
    let config: BoothConfig = serde_json::from_str(&contents)
        .map_err(|e| SettingsError::Parse(format!("{}: {e}", path.display())))?;
    validate(&config)?;
    Ok(config)
}

/// Reject values no booth can run with.
pub fn validate(config: &BoothConfig) -> Result<()> {
    for (name, quality) in [
        ("output_quality", config.output_quality),
        ("capture_quality", config.capture_quality),
    ] {
        if !(1..=100).contains(&quality) {
            return Err(SettingsError::Invalid(format!(
                "{name} must be 1-100, got {quality}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn load_returns_default_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nonexistent.json");
        let result = load(&path).unwrap();
        assert_eq!(result, BoothConfig::default());
    }

    #[test]
    fn load_parses_valid_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photobooth.json");
        let json = r#"{"frame_path":"frames/pink.png","output_dir":"/tmp/cards","viewport_width":375}"#;
        std::fs::write(&path, json).unwrap();

        let result = load(&path).unwrap();
        assert_eq!(result.frame_path, PathBuf::from("frames/pink.png"));
        assert_eq!(result.output_dir, PathBuf::from("/tmp/cards"));
        assert_eq!(result.viewport_width, Some(375));
        assert_eq!(result.countdown_from, 3);
    }

    #[test]
    fn load_returns_error_for_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photobooth.json");
        std::fs::write(&path, "not valid json!!!").unwrap();

        let result = load(&path);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn load_rejects_out_of_range_quality() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photobooth.json");
        std::fs::write(&path, r#"{"output_quality":0}"#).unwrap();

        let result = load(&path);
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&BoothConfig::default()).is_ok());
    }
}
