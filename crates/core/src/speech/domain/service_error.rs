use thiserror::Error;

/// Failure talking to the speech-synthesis or transcription service.
///
/// Every variant is fatal for the run: continuing without audio would leave
/// a scene's captions describing speech that does not exist.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("missing credential: set {0}")]
    MissingCredential(&'static str),
    #[error("{operation} failed with status {status}: {message}")]
    Upstream {
        operation: &'static str,
        status: u16,
        message: String,
    },
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{operation} returned a malformed response: {message}")]
    MalformedResponse {
        operation: &'static str,
        message: String,
    },
}
