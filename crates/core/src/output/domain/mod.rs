pub mod artifact_store;
pub mod artifacts;
pub mod audio_store;
pub mod constants_patcher;
pub mod persist_error;
