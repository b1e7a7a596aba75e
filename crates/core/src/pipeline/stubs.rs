//! In-memory collaborators shared by the pipeline tests.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::captions::domain::transcript::Word;
use crate::output::domain::artifact_store::ArtifactStore;
use crate::output::domain::artifacts::{ConstantPatch, DurationRecord, NarrationTable};
use crate::output::domain::audio_store::AudioStore;
use crate::output::domain::persist_error::PersistError;
use crate::scenes::domain::scene_spec::{DurationPolicy, SceneSpec};
use crate::speech::domain::service_error::ServiceError;
use crate::speech::domain::speech_synthesizer::{SpeechSynthesizer, SynthesisRequest};
use crate::speech::domain::transcriber::Transcriber;

/// Returns the request text as "audio" and fails for texts in `fail_on`.
#[derive(Default)]
pub struct EchoSynthesizer {
    pub fail_on: HashSet<String>,
    pub requests: Arc<Mutex<Vec<SynthesisRequest>>>,
}

impl SpeechSynthesizer for EchoSynthesizer {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_on.contains(&request.text) {
            return Err(ServiceError::Upstream {
                operation: "speech synthesis",
                status: 404,
                message: "DeploymentNotFound".to_string(),
            });
        }
        Ok(request.text.as_bytes().to_vec())
    }
}

/// "Hears" one 0.3s word per whitespace-separated token of the echoed text.
/// Texts in `silent` produce no words.
#[derive(Default)]
pub struct SplittingTranscriber {
    pub silent: HashSet<String>,
}

impl Transcriber for SplittingTranscriber {
    fn transcribe(&self, audio: &[u8], _file_name: &str) -> Result<Vec<Word>, ServiceError> {
        let text = String::from_utf8_lossy(audio).to_string();
        if self.silent.contains(&text) {
            return Ok(Vec::new());
        }
        Ok(text
            .split_whitespace()
            .enumerate()
            .map(|(i, w)| Word::new(w, i as f64 * 0.3, (i + 1) as f64 * 0.3).unwrap())
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct MemoryAudioStore {
    pub saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl AudioStore for MemoryAudioStore {
    fn save(&self, file_stem: &str, audio: &[u8]) -> Result<PathBuf, PersistError> {
        self.saved
            .lock()
            .unwrap()
            .push((file_stem.to_string(), audio.to_vec()));
        Ok(PathBuf::from(format!("{file_stem}.mp3")))
    }
}

#[derive(Default, Clone)]
pub struct MemoryArtifactStore {
    pub narrations: Arc<Mutex<Option<NarrationTable>>>,
    pub durations: Arc<Mutex<Option<DurationRecord>>>,
    pub patches: Arc<Mutex<Vec<ConstantPatch>>>,
}

impl ArtifactStore for MemoryArtifactStore {
    fn write_narrations(&self, table: &NarrationTable) -> Result<(), PersistError> {
        *self.narrations.lock().unwrap() = Some(table.clone());
        Ok(())
    }

    fn read_narrations(&self) -> Result<NarrationTable, PersistError> {
        Ok(self
            .narrations
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(NarrationTable {
                fps: 30,
                scenes: BTreeMap::new(),
            }))
    }

    fn write_durations(&self, record: &DurationRecord) -> Result<(), PersistError> {
        *self.durations.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    fn patch_constants(&self, patches: &[ConstantPatch]) -> Result<(), PersistError> {
        self.patches.lock().unwrap().extend_from_slice(patches);
        Ok(())
    }
}

pub fn scene(key: &str, text: &str) -> SceneSpec {
    SceneSpec::new(key, key, text, DurationPolicy::FromNarration)
}
