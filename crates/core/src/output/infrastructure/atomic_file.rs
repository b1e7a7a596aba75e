use std::fs;
use std::io::Write;
use std::path::Path;

use crate::output::domain::persist_error::PersistError;

/// Writes `contents` to a sibling `.part` file, then renames it over `dest`,
/// so readers only ever see the old or the new file.
pub fn write_atomic(dest: &Path, contents: &[u8]) -> Result<(), PersistError> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = dest.with_extension("part");
    if let Err(e) = write_and_sync(&temp_path, contents) {
        let _ = fs::remove_file(&temp_path);
        return Err(PersistError::Write {
            path: temp_path,
            source: e,
        });
    }

    fs::rename(&temp_path, dest).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PersistError::Write {
            path: dest.to_path_buf(),
            source: e,
        }
    })
}

fn write_and_sync(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.flush()?;
    file.sync_all()
}

pub fn read_to_string(path: &Path) -> Result<String, PersistError> {
    fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })
}
