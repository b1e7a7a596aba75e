use std::path::PathBuf;

use super::persist_error::PersistError;

/// Domain interface for persisting synthesized narration audio.
pub trait AudioStore: Send + Sync {
    /// Stores one scene's audio under `file_stem`, returning where it lives.
    fn save(&self, file_stem: &str, audio: &[u8]) -> Result<PathBuf, PersistError>;
}
