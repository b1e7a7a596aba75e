use std::path::{Path, PathBuf};

use crate::output::domain::audio_store::AudioStore;
use crate::output::domain::persist_error::PersistError;
use crate::shared::constants::AUDIO_EXTENSION;

use super::atomic_file::write_atomic;

/// Stores each scene's narration as `<dir>/<file_stem>.mp3`.
#[derive(Debug, Clone)]
pub struct FileAudioStore {
    dir: PathBuf,
}

impl FileAudioStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, file_stem: &str) -> PathBuf {
        self.dir.join(format!("{file_stem}.{AUDIO_EXTENSION}"))
    }
}

impl AudioStore for FileAudioStore {
    fn save(&self, file_stem: &str, audio: &[u8]) -> Result<PathBuf, PersistError> {
        let path = self.path_for(file_stem);
        write_atomic(&path, audio)?;
        Ok(path)
    }
}
