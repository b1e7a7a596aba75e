use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::output::domain::artifact_store::ArtifactStore;
use crate::output::domain::artifacts::{ConstantPatch, DurationRecord, NarrationTable};
use crate::output::domain::constants_patcher::patch_constants;
use crate::output::domain::persist_error::PersistError;
use crate::shared::constants::{DURATION_STORE_FILENAME, NARRATION_TABLE_FILENAME};

use super::atomic_file::{read_to_string, write_atomic};

/// Keeps the narration table and duration record as pretty-printed JSON in
/// one directory, and optionally patches duration constants in a renderer
/// source file.
#[derive(Debug, Clone)]
pub struct JsonArtifactStore {
    dir: PathBuf,
    constants_file: Option<PathBuf>,
}

impl JsonArtifactStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            constants_file: None,
        }
    }

    pub fn with_constants_file(mut self, path: &Path) -> Self {
        self.constants_file = Some(path.to_path_buf());
        self
    }

    pub fn narration_path(&self) -> PathBuf {
        self.dir.join(NARRATION_TABLE_FILENAME)
    }

    pub fn duration_path(&self) -> PathBuf {
        self.dir.join(DURATION_STORE_FILENAME)
    }

    pub fn read_durations(&self) -> Result<DurationRecord, PersistError> {
        read_json(&self.duration_path())
    }
}

impl ArtifactStore for JsonArtifactStore {
    fn write_narrations(&self, table: &NarrationTable) -> Result<(), PersistError> {
        let path = self.narration_path();
        write_json(&path, table)?;
        log::info!("Captions -> {}", path.display());
        Ok(())
    }

    fn read_narrations(&self) -> Result<NarrationTable, PersistError> {
        read_json(&self.narration_path())
    }

    fn write_durations(&self, record: &DurationRecord) -> Result<(), PersistError> {
        let path = self.duration_path();
        write_json(&path, record)?;
        log::info!("Durations -> {} (total {} frames)", path.display(), record.total);
        Ok(())
    }

    fn check_constants(&self, patches: &[ConstantPatch]) -> Result<(), PersistError> {
        if let Some(path) = &self.constants_file {
            patch_constants(&read_to_string(path)?, patches)?;
        }
        Ok(())
    }

    fn patch_constants(&self, patches: &[ConstantPatch]) -> Result<(), PersistError> {
        let Some(path) = &self.constants_file else {
            return Ok(());
        };
        // Read everything first, patch in memory, write once.
        let source = read_to_string(path)?;
        let patched = patch_constants(&source, patches)?;
        if patched != source {
            write_atomic(path, patched.as_bytes())?;
        }
        log::info!("Patched {} constants in {}", patches.len(), path.display());
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let json = read_to_string(path)?;
    serde_json::from_str(&json).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })
}
