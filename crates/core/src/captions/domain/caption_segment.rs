use serde::{Deserialize, Serialize};

use super::caption_error::CaptionError;

/// A span of frames `[start_frame, end_frame)` during which one caption is shown.
///
/// Segments of one scene are ordered by `start_frame` and may overlap by a few
/// frames when speech is dense; see [`caption_at`] for which one is shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCaptionSegment")]
pub struct CaptionSegment {
    #[serde(rename = "start")]
    start_frame: u32,
    #[serde(rename = "end")]
    end_frame: u32,
    text: String,
}

#[derive(Deserialize)]
struct RawCaptionSegment {
    start: u32,
    end: u32,
    text: String,
}

impl TryFrom<RawCaptionSegment> for CaptionSegment {
    type Error = CaptionError;

    fn try_from(raw: RawCaptionSegment) -> Result<Self, Self::Error> {
        CaptionSegment::new(raw.start, raw.end, raw.text)
    }
}

impl CaptionSegment {
    pub fn new(
        start_frame: u32,
        end_frame: u32,
        text: impl Into<String>,
    ) -> Result<Self, CaptionError> {
        let text = text.into();
        if end_frame <= start_frame {
            return Err(CaptionError::EmptySegmentSpan {
                text,
                start: start_frame,
                end: end_frame,
            });
        }
        Ok(Self {
            start_frame,
            end_frame,
            text,
        })
    }

    /// For callers that derive bounds which are ordered by construction.
    pub(crate) fn from_ordered_bounds(start_frame: u32, end_frame: u32, text: String) -> Self {
        debug_assert!(end_frame > start_frame);
        Self {
            start_frame,
            end_frame,
            text,
        }
    }

    pub fn start_frame(&self) -> u32 {
        self.start_frame
    }

    pub fn end_frame(&self) -> u32 {
        self.end_frame
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn duration_frames(&self) -> u32 {
        self.end_frame - self.start_frame
    }

    pub fn contains(&self, frame: u32) -> bool {
        frame >= self.start_frame && frame < self.end_frame
    }
}

/// The caption shown at `frame`: the earliest-starting segment whose window
/// contains it. Relies on `captions` being ordered by start frame.
pub fn caption_at(captions: &[CaptionSegment], frame: u32) -> Option<&CaptionSegment> {
    captions.iter().find(|c| c.contains(frame))
}

/// Like [`caption_at`], but nothing is shown during the first `guard` frames of
/// the scene while the incoming transition is still playing.
pub fn visible_caption(
    captions: &[CaptionSegment],
    frame: u32,
    guard: u32,
) -> Option<&CaptionSegment> {
    if frame < guard {
        return None;
    }
    caption_at(captions, frame)
}

/// Last frame covered by any caption, or `None` for an empty list.
pub fn last_caption_frame(captions: &[CaptionSegment]) -> Option<u32> {
    captions.iter().map(|c| c.end_frame).max()
}
