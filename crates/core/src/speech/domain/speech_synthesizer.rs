use super::service_error::ServiceError;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub speed: f64,
}

/// Domain interface for text-to-speech.
///
/// Implementations return the encoded audio (MP3) for the request.
pub trait SpeechSynthesizer: Send + Sync {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ServiceError>;
}
