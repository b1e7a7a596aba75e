pub mod service_error;
pub mod speech_synthesizer;
pub mod transcriber;
