use std::time::Instant;

use crate::captions::domain::transcript::Word;
use crate::scenes::domain::scene_spec::SceneSpec;
use crate::shared::constants::AUDIO_EXTENSION;
use crate::speech::domain::speech_synthesizer::{SpeechSynthesizer, SynthesisRequest};
use crate::speech::domain::transcriber::Transcriber;

use super::pipeline_error::PipelineError;

/// The collaborators and voice parameters every scene is sent through.
pub struct NarrationServices<'a> {
    pub synthesizer: &'a dyn SpeechSynthesizer,
    pub transcriber: &'a dyn Transcriber,
    pub voice: &'a str,
    pub speed: f64,
}

/// One scene after its synthesis and transcription round trips.
#[derive(Debug, Clone, PartialEq)]
pub struct VoicedScene {
    pub index: usize,
    pub key: String,
    pub audio: Vec<u8>,
    pub words: Vec<Word>,
    pub tts_ms: f64,
    pub transcribe_ms: f64,
}

/// Synthesizes one scene's narration, then transcribes the result for word timings.
pub fn voice_scene(
    services: &NarrationServices<'_>,
    index: usize,
    scene: &SceneSpec,
) -> Result<VoicedScene, PipelineError> {
    let service_err = |source| PipelineError::Service {
        scene: scene.key.clone(),
        source,
    };

    let started = Instant::now();
    let audio = services
        .synthesizer
        .synthesize(&SynthesisRequest {
            text: scene.text.clone(),
            voice: services.voice.to_string(),
            speed: services.speed,
        })
        .map_err(service_err)?;
    let tts_ms = started.elapsed().as_secs_f64() * 1000.0;

    let started = Instant::now();
    let file_name = format!("{}.{AUDIO_EXTENSION}", scene.file_stem);
    let words = services
        .transcriber
        .transcribe(&audio, &file_name)
        .map_err(service_err)?;
    let transcribe_ms = started.elapsed().as_secs_f64() * 1000.0;

    log::debug!(
        "[{}] {} bytes of audio, {} words",
        scene.file_stem,
        audio.len(),
        words.len()
    );

    Ok(VoicedScene {
        index,
        key: scene.key.clone(),
        audio,
        words,
        tts_ms,
        transcribe_ms,
    })
}

/// Abstracts how the per-scene synthesize → transcribe stage is scheduled.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations (sequential, threaded). Implementations return
/// results in scene order and fail the whole batch if any scene fails.
pub trait NarrationExecutor: Send {
    fn execute(
        &self,
        services: &NarrationServices<'_>,
        scenes: &[SceneSpec],
        on_voiced: &mut dyn FnMut(&VoicedScene),
    ) -> Result<Vec<VoicedScene>, PipelineError>;
}
