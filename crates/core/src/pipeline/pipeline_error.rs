use thiserror::Error;

use crate::captions::domain::caption_error::CaptionError;
use crate::output::domain::persist_error::PersistError;
use crate::scenes::domain::pipeline_settings::SettingsError;
use crate::speech::domain::service_error::ServiceError;
use crate::timing::domain::timing_error::TimingError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("scene '{scene}': {source}")]
    Service {
        scene: String,
        #[source]
        source: ServiceError,
    },
    #[error("scene '{scene}': {source}")]
    Timing {
        scene: String,
        #[source]
        source: TimingError,
    },
    #[error("composition timing: {0}")]
    Composition(#[source] TimingError),
    #[error("scene '{0}' has no narration in the caption table")]
    MissingNarration(String),
    #[error("caption table was generated at {found} fps but settings use {expected} fps")]
    FpsMismatch { expected: u32, found: u32 },
    #[error(transparent)]
    Caption(#[from] CaptionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
