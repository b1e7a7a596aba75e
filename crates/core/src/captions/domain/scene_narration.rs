use serde::{Deserialize, Serialize};

use crate::shared::constants::{FALLBACK_CAPTION_END, FALLBACK_CAPTION_START};

use super::caption_segment::CaptionSegment;
use super::transcript::Word;
use super::transcript_segmenter::TranscriptSegmenter;

/// Where a scene's caption timings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionSource {
    /// Derived from word-level timestamps.
    Transcribed,
    /// The service returned no words; one placeholder caption spans the fixed fallback window.
    Fallback,
}

/// Narration text of one scene plus its rendered caption timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNarration {
    pub text: String,
    pub captions: Vec<CaptionSegment>,
    pub source: CaptionSource,
}

impl SceneNarration {
    /// Segments `words`, or falls back to a single placeholder caption carrying
    /// the full `text` when the transcription is empty.
    pub fn from_words(text: &str, words: &[Word], segmenter: &TranscriptSegmenter) -> Self {
        if words.is_empty() {
            return Self::fallback(text);
        }
        Self {
            text: text.to_string(),
            captions: segmenter.segment(words),
            source: CaptionSource::Transcribed,
        }
    }

    pub fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            captions: vec![fallback_caption(text)],
            source: CaptionSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == CaptionSource::Fallback
    }
}

pub fn fallback_caption(text: &str) -> CaptionSegment {
    CaptionSegment::from_ordered_bounds(
        FALLBACK_CAPTION_START,
        FALLBACK_CAPTION_END,
        text.to_string(),
    )
}
