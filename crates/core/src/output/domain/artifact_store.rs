use super::artifacts::{ConstantPatch, DurationRecord, NarrationTable};
use super::persist_error::PersistError;

/// Domain interface for the generated configuration consumed by the renderer.
pub trait ArtifactStore: Send {
    fn write_narrations(&self, table: &NarrationTable) -> Result<(), PersistError>;

    fn read_narrations(&self) -> Result<NarrationTable, PersistError>;

    fn write_durations(&self, record: &DurationRecord) -> Result<(), PersistError>;

    /// Fails if `patches` would not apply cleanly. Writes nothing.
    fn check_constants(&self, _patches: &[ConstantPatch]) -> Result<(), PersistError> {
        Ok(())
    }

    /// Rewrites named duration constants in place. Default: nothing to patch.
    fn patch_constants(&self, _patches: &[ConstantPatch]) -> Result<(), PersistError> {
        Ok(())
    }
}
