use crate::captions::domain::transcript::Word;

use super::service_error::ServiceError;

/// Domain interface for speech-to-text with word-level timestamps.
///
/// An empty result is valid: the service heard nothing it could time.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &[u8], file_name: &str) -> Result<Vec<Word>, ServiceError>;
}
