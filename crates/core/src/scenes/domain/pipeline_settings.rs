use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_SPEED, DEFAULT_VOICE, DURATION_BUFFER, TRANSITION_DURATION, VIDEO_FPS,
    WORDS_PER_SEGMENT,
};

use super::scene_spec::{default_scenes, SceneSpec};

pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 4.0;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON in {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
    #[error("speed must be between 0.25 and 4.0, got {0}")]
    Speed(f64),
    #[error("duplicate scene key '{0}'")]
    DuplicateScene(String),
    #[error("no scenes configured")]
    NoScenes,
}

/// Constants shared by every scene of one pipeline run, plus the scene list.
///
/// Every field is optional in the settings file and defaults to the values
/// the renderer was built against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub fps: u32,
    pub words_per_segment: usize,
    pub duration_buffer: u32,
    pub transition_frames: u32,
    pub voice: String,
    pub speed: f64,
    pub scenes: Vec<SceneSpec>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            fps: VIDEO_FPS,
            words_per_segment: WORDS_PER_SEGMENT,
            duration_buffer: DURATION_BUFFER,
            transition_frames: TRANSITION_DURATION,
            voice: DEFAULT_VOICE.to_string(),
            speed: DEFAULT_SPEED,
            scenes: default_scenes(),
        }
    }
}

impl PipelineSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.fps == 0 {
            return Err(SettingsError::Zero { field: "fps" });
        }
        if self.words_per_segment == 0 {
            return Err(SettingsError::Zero {
                field: "words_per_segment",
            });
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(SettingsError::Speed(self.speed));
        }
        if self.scenes.is_empty() {
            return Err(SettingsError::NoScenes);
        }
        let mut seen = HashSet::new();
        for scene in &self.scenes {
            if !seen.insert(scene.key.as_str()) {
                return Err(SettingsError::DuplicateScene(scene.key.clone()));
            }
        }
        Ok(())
    }

    pub fn scene(&self, key: &str) -> Option<&SceneSpec> {
        self.scenes.iter().find(|s| s.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::domain::scene_spec::DurationPolicy;

    #[test]
    fn test_defaults_are_valid() {
        let settings = PipelineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.fps, 30);
        assert_eq!(settings.words_per_segment, 8);
        assert_eq!(settings.duration_buffer, 45);
        assert_eq!(settings.transition_frames, 25);
        assert_eq!(settings.voice, "onyx");
        assert_eq!(settings.scenes.len(), 7);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: PipelineSettings = serde_json::from_str(r#"{"fps": 24}"#).unwrap();
        assert_eq!(settings.fps, 24);
        assert_eq!(settings.words_per_segment, 8);
        assert_eq!(settings.scenes.len(), 7);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let settings = PipelineSettings {
            fps: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Zero { field: "fps" })
        ));
    }

    #[test]
    fn test_speed_out_of_range_rejected() {
        let settings = PipelineSettings {
            speed: 5.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Speed(_))));
    }

    #[test]
    fn test_duplicate_scene_rejected() {
        let mut settings = PipelineSettings::default();
        let dup = settings.scenes[0].clone();
        settings.scenes.push(dup);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::DuplicateScene(ref k)) if k == "title"
        ));
    }

    #[test]
    fn test_empty_scene_list_rejected() {
        let settings = PipelineSettings {
            scenes: vec![],
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::NoScenes)));
    }

    #[test]
    fn test_scene_lookup() {
        let settings = PipelineSettings::default();
        assert_eq!(
            settings.scene("demo").unwrap().duration,
            DurationPolicy::Fixed(300)
        );
        assert!(settings.scene("missing").is_none());
    }
}
