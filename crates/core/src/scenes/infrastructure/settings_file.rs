use std::fs;
use std::path::Path;

use crate::scenes::domain::pipeline_settings::{PipelineSettings, SettingsError};

/// Loads and validates pipeline settings from a JSON file.
///
/// `None` yields the built-in defaults.
pub fn load(path: Option<&Path>) -> Result<PipelineSettings, SettingsError> {
    let settings = match path {
        None => PipelineSettings::default(),
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
    };
    settings.validate()?;
    log::debug!(
        "Settings: {} scenes at {} fps, {} words per caption",
        settings.scenes.len(),
        settings.fps,
        settings.words_per_segment
    );
    Ok(settings)
}
