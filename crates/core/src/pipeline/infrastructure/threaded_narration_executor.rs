use std::sync::atomic::{AtomicBool, Ordering};

use crate::pipeline::narration_executor::{
    voice_scene, NarrationExecutor, NarrationServices, VoicedScene,
};
use crate::pipeline::pipeline_error::PipelineError;
use crate::scenes::domain::scene_spec::SceneSpec;

pub const DEFAULT_WORKERS: usize = 4;

type SceneResult = (usize, Result<VoicedScene, PipelineError>);

/// Voices scenes concurrently on a small worker pool.
///
/// Layout: `jobs → N workers [synthesize, transcribe] → main [reorder]`
///
/// Scenes are independent, so the only shared state is the failure flag: once
/// one scene fails, idle workers stop picking up new scenes. Results are
/// returned in scene order regardless of completion order.
pub struct ThreadedNarrationExecutor {
    workers: usize,
}

impl ThreadedNarrationExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl Default for ThreadedNarrationExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl NarrationExecutor for ThreadedNarrationExecutor {
    fn execute(
        &self,
        services: &NarrationServices<'_>,
        scenes: &[SceneSpec],
        on_voiced: &mut dyn FnMut(&VoicedScene),
    ) -> Result<Vec<VoicedScene>, PipelineError> {
        let total = scenes.len();
        if total == 0 {
            return Ok(Vec::new());
        }
        let workers = self.workers.min(total);

        let (job_tx, job_rx) = crossbeam_channel::bounded::<(usize, &SceneSpec)>(total);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<SceneResult>(total);
        for job in scenes.iter().enumerate() {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);

        let failed = AtomicBool::new(false);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let done_tx = done_tx.clone();
                let failed = &failed;
                scope.spawn(move || {
                    for (index, scene) in job_rx {
                        if failed.load(Ordering::Relaxed) {
                            break;
                        }
                        let result = voice_scene(services, index, scene);
                        if result.is_err() {
                            failed.store(true, Ordering::Relaxed);
                        }
                        if done_tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(done_tx);

            collect_in_order(done_rx, total, on_voiced)
        })
    }
}

/// Drains worker results and reorders them by scene index. The lowest-index
/// failure wins so the reported error does not depend on thread timing.
fn collect_in_order(
    done_rx: crossbeam_channel::Receiver<SceneResult>,
    total: usize,
    on_voiced: &mut dyn FnMut(&VoicedScene),
) -> Result<Vec<VoicedScene>, PipelineError> {
    let mut slots: Vec<Option<VoicedScene>> = (0..total).map(|_| None).collect();
    let mut first_error: Option<(usize, PipelineError)> = None;

    for (index, result) in done_rx {
        match result {
            Ok(voiced) => {
                on_voiced(&voiced);
                slots[index] = Some(voiced);
            }
            Err(e) => {
                let earlier = first_error.as_ref().map_or(true, |(i, _)| index < *i);
                if earlier {
                    first_error = Some((index, e));
                }
            }
        }
    }

    if let Some((_, e)) = first_error {
        return Err(e);
    }
    Ok(slots.into_iter().flatten().collect())
}
