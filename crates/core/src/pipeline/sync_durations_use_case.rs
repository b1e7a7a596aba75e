use std::collections::BTreeMap;

use crate::captions::domain::scene_narration::SceneNarration;
use crate::output::domain::artifact_store::ArtifactStore;
use crate::output::domain::artifacts::{ConstantPatch, DurationRecord};
use crate::scenes::domain::pipeline_settings::PipelineSettings;
use crate::scenes::domain::scene_spec::DurationPolicy;
use crate::timing::domain::composition_schedule::{schedule, ScheduledScene};
use crate::timing::domain::scene_duration::scene_duration;
use crate::timing::domain::total_duration::{total_duration, transitions_used, SceneSlot};

use super::pipeline_error::PipelineError;

/// Per-scene frame budgets and the resulting composition length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationPlan {
    /// One slot per configured scene, in playback order (inactive ones included).
    pub slots: Vec<SceneSlot>,
    pub total: u32,
    pub transitions: usize,
    pub schedule: Vec<ScheduledScene>,
}

impl DurationPlan {
    pub fn record(&self, fps: u32, transition_frames: u32) -> DurationRecord {
        DurationRecord {
            fps,
            transition_frames,
            scenes: self
                .slots
                .iter()
                .map(|s| (s.key.clone(), s.duration))
                .collect(),
            total: self.total,
        }
    }

    pub fn duration_of(&self, key: &str) -> Option<u32> {
        self.slots.iter().find(|s| s.key == key).map(|s| s.duration)
    }
}

/// Sizes every scene and the whole composition from caption timelines.
///
/// Narration-sized scenes need an entry in `narrations`; fixed-length
/// scenes take their configured frame count and are inactive at zero.
pub fn plan_durations(
    settings: &PipelineSettings,
    narrations: &BTreeMap<String, SceneNarration>,
) -> Result<DurationPlan, PipelineError> {
    let mut slots = Vec::with_capacity(settings.scenes.len());
    for scene in &settings.scenes {
        let duration = match scene.duration {
            DurationPolicy::Fixed(frames) => frames,
            DurationPolicy::FromNarration => {
                let narration = narrations
                    .get(&scene.key)
                    .ok_or_else(|| PipelineError::MissingNarration(scene.key.clone()))?;
                scene_duration(&narration.captions, settings.duration_buffer).map_err(
                    |source| PipelineError::Timing {
                        scene: scene.key.clone(),
                        source,
                    },
                )?
            }
        };
        slots.push(SceneSlot::new(scene.key.clone(), duration));
    }

    let total =
        total_duration(&slots, settings.transition_frames).map_err(PipelineError::Composition)?;
    let schedule =
        schedule(&slots, settings.transition_frames).map_err(PipelineError::Composition)?;
    let transitions = transitions_used(&slots);

    Ok(DurationPlan {
        slots,
        total,
        transitions,
        schedule,
    })
}

/// Renderer constants to rewrite: only durations derived from narration.
/// Fixed-length scenes stay hand-authored.
pub fn constant_patches(settings: &PipelineSettings, plan: &DurationPlan) -> Vec<ConstantPatch> {
    settings
        .scenes
        .iter()
        .filter(|s| s.duration == DurationPolicy::FromNarration)
        .filter_map(|s| {
            plan.duration_of(&s.key).map(|value| ConstantPatch {
                name: s.duration_constant(),
                value,
            })
        })
        .collect()
}

/// Recomputes scene durations from the stored caption table without
/// contacting the speech service, e.g. after a fixed scene's length changed.
pub struct SyncDurationsUseCase {
    settings: PipelineSettings,
    store: Box<dyn ArtifactStore>,
    dry_run: bool,
}

impl SyncDurationsUseCase {
    pub fn new(settings: PipelineSettings, store: Box<dyn ArtifactStore>) -> Self {
        Self {
            settings,
            store,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn execute(&self) -> Result<DurationPlan, PipelineError> {
        let table = self.store.read_narrations()?;
        if table.fps != self.settings.fps {
            return Err(PipelineError::FpsMismatch {
                expected: self.settings.fps,
                found: table.fps,
            });
        }

        let plan = plan_durations(&self.settings, &table.scenes)?;
        log::info!(
            "{} active scenes, {} transitions, {} frames total",
            plan.schedule.len(),
            plan.transitions,
            plan.total
        );

        let patches = constant_patches(&self.settings, &plan);
        self.store.check_constants(&patches)?;
        if self.dry_run {
            return Ok(plan);
        }
        self.store.write_durations(
            &plan.record(self.settings.fps, self.settings.transition_frames),
        )?;
        self.store.patch_constants(&patches)?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::domain::caption_segment::CaptionSegment;
    use crate::captions::domain::scene_narration::CaptionSource;
    use crate::output::domain::artifacts::NarrationTable;
    use crate::output::domain::persist_error::PersistError;
    use crate::output::infrastructure::json_artifact_store::JsonArtifactStore;
    use crate::pipeline::stubs::MemoryArtifactStore;
    use std::fs;
    use tempfile::TempDir;
    use crate::scenes::domain::scene_spec::SceneSpec;

    fn narration_ending_at(end: u32) -> SceneNarration {
        SceneNarration {
            text: "x".to_string(),
            captions: vec![CaptionSegment::new(0, end, "x").unwrap()],
            source: CaptionSource::Transcribed,
        }
    }

    /// Narrations whose durations reproduce the reference composition
    /// (230, 350, 515, 525, demo 300, 415, 335).
    fn reference_narrations() -> BTreeMap<String, SceneNarration> {
        [
            ("title", 185),
            ("hackIdea", 305),
            ("architecture", 470),
            ("codeWalkthrough", 480),
            ("demo", 100),
            ("benefits", 370),
            ("futureScope", 290),
        ]
        .into_iter()
        .map(|(k, end)| (k.to_string(), narration_ending_at(end)))
        .collect()
    }

    #[test]
    fn test_reference_composition() {
        let settings = PipelineSettings::default();
        let plan = plan_durations(&settings, &reference_narrations()).unwrap();
        assert_eq!(plan.duration_of("title"), Some(230));
        assert_eq!(plan.duration_of("demo"), Some(300));
        assert_eq!(plan.transitions, 6);
        assert_eq!(plan.total, 2670 - 6 * 25);
        assert_eq!(plan.schedule.last().unwrap().end_frame(), plan.total);
    }

    #[test]
    fn test_demo_omitted_drops_scene_and_transition() {
        let mut settings = PipelineSettings::default();
        settings.scenes[4].duration = DurationPolicy::Fixed(0);
        let plan = plan_durations(&settings, &reference_narrations()).unwrap();
        assert_eq!(plan.transitions, 5);
        assert_eq!(plan.schedule.len(), 6);
        assert_eq!(plan.total, 2370 - 5 * 25);
        assert_eq!(plan.slots.len(), 7);
    }

    #[test]
    fn test_missing_narration_is_error() {
        let settings = PipelineSettings::default();
        let mut narrations = reference_narrations();
        narrations.remove("benefits");
        let err = plan_durations(&settings, &narrations).unwrap_err();
        assert!(matches!(err, PipelineError::MissingNarration(ref k) if k == "benefits"));
    }

    #[test]
    fn test_empty_captions_fail_loudly() {
        let settings = PipelineSettings::default();
        let mut narrations = reference_narrations();
        narrations.get_mut("title").unwrap().captions.clear();
        let err = plan_durations(&settings, &narrations).unwrap_err();
        assert!(matches!(err, PipelineError::Timing { ref scene, .. } if scene == "title"));
    }

    #[test]
    fn test_constant_patches_skip_fixed_scenes() {
        let settings = PipelineSettings::default();
        let plan = plan_durations(&settings, &reference_narrations()).unwrap();
        let patches = constant_patches(&settings, &plan);
        let names: Vec<&str> = patches.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(patches.len(), 6);
        assert!(!names.contains(&"DEMO_DURATION"));
        assert_eq!(names[0], "TITLE_DURATION");
        assert_eq!(patches[0].value, 230);
    }

    #[test]
    fn test_record_lists_every_scene() {
        let settings = PipelineSettings::default();
        let plan = plan_durations(&settings, &reference_narrations()).unwrap();
        let record = plan.record(30, 25);
        assert_eq!(record.scenes.len(), 7);
        assert_eq!(record.scenes["codeWalkthrough"], 525);
        assert_eq!(record.total, plan.total);
    }

    #[test]
    fn test_resync_writes_record_and_patches() {
        let store = MemoryArtifactStore::default();
        *store.narrations.lock().unwrap() = Some(NarrationTable {
            fps: 30,
            scenes: reference_narrations(),
        });
        let durations = store.durations.clone();
        let patches = store.patches.clone();

        let plan = SyncDurationsUseCase::new(PipelineSettings::default(), Box::new(store))
            .execute()
            .unwrap();

        assert_eq!(durations.lock().unwrap().as_ref().unwrap().total, plan.total);
        assert_eq!(patches.lock().unwrap().len(), 6);
    }

    #[test]
    fn test_resync_dry_run_writes_nothing() {
        let store = MemoryArtifactStore::default();
        *store.narrations.lock().unwrap() = Some(NarrationTable {
            fps: 30,
            scenes: reference_narrations(),
        });
        let durations = store.durations.clone();

        SyncDurationsUseCase::new(PipelineSettings::default(), Box::new(store))
            .with_dry_run(true)
            .execute()
            .unwrap();
        assert!(durations.lock().unwrap().is_none());
    }

    #[test]
    fn test_resync_rejects_fps_mismatch() {
        let store = MemoryArtifactStore::default();
        *store.narrations.lock().unwrap() = Some(NarrationTable {
            fps: 24,
            scenes: reference_narrations(),
        });
        let err = SyncDurationsUseCase::new(PipelineSettings::default(), Box::new(store))
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::FpsMismatch {
                expected: 30,
                found: 24
            }
        ));
    }

    #[test]
    fn test_resync_constants_mismatch_keeps_previous_record() {
        let tmp = TempDir::new().unwrap();
        let constants = tmp.path().join("constants.ts");
        fs::write(&constants, "export const TITLE_DURATION = 1;\n").unwrap();
        let store = JsonArtifactStore::new(tmp.path()).with_constants_file(&constants);
        store
            .write_narrations(&NarrationTable {
                fps: 30,
                scenes: reference_narrations(),
            })
            .unwrap();

        let err = SyncDurationsUseCase::new(PipelineSettings::default(), Box::new(store))
            .execute()
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Persist(PersistError::PatchMismatch { found: 0, .. })
        ));
        assert!(!tmp.path().join("durations.json").exists());
    }

    #[test]
    fn test_custom_scene_list() {
        let settings = PipelineSettings {
            scenes: vec![
                SceneSpec::new("intro", "intro", "Hi.", DurationPolicy::FromNarration),
                SceneSpec::new("clip", "clip", "Watch.", DurationPolicy::Fixed(90)),
            ],
            ..Default::default()
        };
        let narrations: BTreeMap<String, SceneNarration> =
            [("intro".to_string(), narration_ending_at(100))].into_iter().collect();
        let plan = plan_durations(&settings, &narrations).unwrap();
        assert_eq!(plan.total, 145 + 90 - 25);
    }
}
