pub mod atomic_file;
pub mod file_audio_store;
pub mod json_artifact_store;
