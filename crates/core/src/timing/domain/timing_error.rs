use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimingError {
    #[error("scene has no captions; a fallback caption must be supplied before sizing it")]
    EmptyCaptions,
    #[error(
        "composition of {total} frames is shorter than scene '{scene}' ({longest} frames); \
         transitions would erase it"
    )]
    SceneErased {
        scene: String,
        total: i64,
        longest: u32,
    },
    #[error("transition of {transition} frames is longer than scene '{scene}' ({duration} frames)")]
    TransitionTooLong {
        scene: String,
        transition: u32,
        duration: u32,
    },
    #[error("frame count overflow while summing scene durations")]
    Overflow,
}
