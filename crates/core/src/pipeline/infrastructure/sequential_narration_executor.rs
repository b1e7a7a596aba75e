use crate::pipeline::narration_executor::{
    voice_scene, NarrationExecutor, NarrationServices, VoicedScene,
};
use crate::pipeline::pipeline_error::PipelineError;
use crate::scenes::domain::scene_spec::SceneSpec;

/// Voices scenes one at a time, in order, stopping at the first failure.
#[derive(Debug, Default)]
pub struct SequentialNarrationExecutor;

impl NarrationExecutor for SequentialNarrationExecutor {
    fn execute(
        &self,
        services: &NarrationServices<'_>,
        scenes: &[SceneSpec],
        on_voiced: &mut dyn FnMut(&VoicedScene),
    ) -> Result<Vec<VoicedScene>, PipelineError> {
        let mut voiced = Vec::with_capacity(scenes.len());
        for (index, scene) in scenes.iter().enumerate() {
            let result = voice_scene(services, index, scene)?;
            on_voiced(&result);
            voiced.push(result);
        }
        Ok(voiced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::stubs::{scene, EchoSynthesizer, SplittingTranscriber};

    #[test]
    fn test_voices_scenes_in_order() {
        let synth = EchoSynthesizer::default();
        let transcriber = SplittingTranscriber::default();
        let services = NarrationServices {
            synthesizer: &synth,
            transcriber: &transcriber,
            voice: "onyx",
            speed: 0.95,
        };
        let scenes = vec![scene("a", "one two"), scene("b", "three")];

        let mut seen = Vec::new();
        let voiced = SequentialNarrationExecutor
            .execute(&services, &scenes, &mut |v| seen.push(v.key.clone()))
            .unwrap();

        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(voiced[0].words.len(), 2);
        assert_eq!(voiced[1].audio, b"three");
        let requests = synth.requests.lock().unwrap();
        assert_eq!(requests[0].voice, "onyx");
        assert_eq!(requests[0].speed, 0.95);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let synth = EchoSynthesizer {
            fail_on: ["boom".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let transcriber = SplittingTranscriber::default();
        let services = NarrationServices {
            synthesizer: &synth,
            transcriber: &transcriber,
            voice: "onyx",
            speed: 1.0,
        };
        let scenes = vec![scene("a", "boom"), scene("b", "never sent")];

        let err = SequentialNarrationExecutor
            .execute(&services, &scenes, &mut |_| {})
            .unwrap_err();

        assert!(matches!(err, PipelineError::Service { ref scene, .. } if scene == "a"));
        assert_eq!(synth.requests.lock().unwrap().len(), 1);
    }
}
