use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::captions::domain::scene_narration::SceneNarration;
use crate::captions::domain::transcript_segmenter::TranscriptSegmenter;
use crate::output::domain::artifact_store::ArtifactStore;
use crate::output::domain::artifacts::NarrationTable;
use crate::output::domain::audio_store::AudioStore;
use crate::scenes::domain::pipeline_settings::PipelineSettings;
use crate::speech::domain::speech_synthesizer::SpeechSynthesizer;
use crate::speech::domain::transcriber::Transcriber;

use super::narration_executor::{NarrationExecutor, NarrationServices};
use super::pipeline_error::PipelineError;
use super::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use super::sync_durations_use_case::{constant_patches, plan_durations, DurationPlan};

/// Everything one generation run produced.
#[derive(Debug)]
pub struct NarrationReport {
    pub narrations: BTreeMap<String, SceneNarration>,
    pub plan: DurationPlan,
    /// Empty on a dry run.
    pub audio_paths: Vec<PathBuf>,
    /// Scenes whose transcription came back empty and got the fallback caption.
    pub degraded: Vec<String>,
}

/// Voices every scene, derives captions and durations, then persists them.
///
/// Nothing is written until every scene has been voiced, so a failed run
/// leaves the previous artifacts in place.
pub struct GenerateNarrationUseCase {
    synthesizer: Box<dyn SpeechSynthesizer>,
    transcriber: Box<dyn Transcriber>,
    audio_store: Box<dyn AudioStore>,
    artifacts: Box<dyn ArtifactStore>,
    executor: Box<dyn NarrationExecutor>,
    settings: PipelineSettings,
    logger: Box<dyn PipelineLogger>,
    dry_run: bool,
}

impl GenerateNarrationUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        synthesizer: Box<dyn SpeechSynthesizer>,
        transcriber: Box<dyn Transcriber>,
        audio_store: Box<dyn AudioStore>,
        artifacts: Box<dyn ArtifactStore>,
        executor: Box<dyn NarrationExecutor>,
        settings: PipelineSettings,
        logger: Option<Box<dyn PipelineLogger>>,
        dry_run: bool,
    ) -> Self {
        Self {
            synthesizer,
            transcriber,
            audio_store,
            artifacts,
            executor,
            settings,
            logger: logger.unwrap_or_else(|| Box::new(NullPipelineLogger)),
            dry_run,
        }
    }

    pub fn execute(&mut self) -> Result<NarrationReport, PipelineError> {
        self.settings.validate()?;
        let segmenter =
            TranscriptSegmenter::new(self.settings.words_per_segment, self.settings.fps)?;

        let services = NarrationServices {
            synthesizer: self.synthesizer.as_ref(),
            transcriber: self.transcriber.as_ref(),
            voice: &self.settings.voice,
            speed: self.settings.speed,
        };
        let total = self.settings.scenes.len();
        let logger = &mut self.logger;
        let mut done = 0;
        let voiced = self
            .executor
            .execute(&services, &self.settings.scenes, &mut |scene| {
                done += 1;
                logger.timing("tts", scene.tts_ms);
                logger.timing("transcribe", scene.transcribe_ms);
                logger.progress(done, total);
            })?;

        let mut narrations = BTreeMap::new();
        let mut degraded = Vec::new();
        for (scene, voice) in self.settings.scenes.iter().zip(&voiced) {
            let narration = SceneNarration::from_words(&scene.text, &voice.words, &segmenter);
            if narration.is_fallback() {
                self.logger.warn(&format!(
                    "{}: empty transcription, using fallback caption",
                    scene.key
                ));
                degraded.push(scene.key.clone());
            }
            self.logger
                .metric("caption_segments", narration.captions.len() as f64);
            narrations.insert(scene.key.clone(), narration);
        }

        let plan = plan_durations(&self.settings, &narrations)?;
        self.logger.info(&format!(
            "{} scenes, {} transitions, {} frames total",
            plan.schedule.len(),
            plan.transitions,
            plan.total
        ));

        // A drifted constants file must fail the run before anything is written.
        let patches = constant_patches(&self.settings, &plan);
        self.artifacts.check_constants(&patches)?;

        let mut audio_paths = Vec::new();
        if self.dry_run {
            self.logger.info("dry run: no files written");
        } else {
            for (scene, voice) in self.settings.scenes.iter().zip(&voiced) {
                audio_paths.push(self.audio_store.save(&scene.file_stem, &voice.audio)?);
            }
            self.artifacts.write_narrations(&NarrationTable {
                fps: self.settings.fps,
                scenes: narrations.clone(),
            })?;
            self.artifacts
                .write_durations(&plan.record(self.settings.fps, self.settings.transition_frames))?;
            self.artifacts.patch_constants(&patches)?;
        }

        self.logger.summary();
        Ok(NarrationReport {
            narrations,
            plan,
            audio_paths,
            degraded,
        })
    }
}
