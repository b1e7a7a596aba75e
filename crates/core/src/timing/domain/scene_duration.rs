use crate::captions::domain::caption_segment::{last_caption_frame, CaptionSegment};

use super::timing_error::TimingError;

/// On-screen length of a scene: its last caption frame plus a silence buffer.
///
/// An empty caption list is a contract violation; callers substitute the
/// fallback caption before sizing a scene.
pub fn scene_duration(captions: &[CaptionSegment], buffer: u32) -> Result<u32, TimingError> {
    let last = last_caption_frame(captions).ok_or(TimingError::EmptyCaptions)?;
    last.checked_add(buffer).ok_or(TimingError::Overflow)
}
