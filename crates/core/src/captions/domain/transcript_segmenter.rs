use crate::shared::constants::{
    CAPTION_HANG_FRAMES, CAPTION_LEAD_IN_FRAMES, VIDEO_FPS, WORDS_PER_SEGMENT,
};
use crate::shared::frame_time::{hang_frame, lead_in_frame};

use super::caption_error::CaptionError;
use super::caption_segment::CaptionSegment;
use super::transcript::Word;

/// Groups a time-ordered word list into fixed-size caption segments.
///
/// Each segment starts `lead_in` frames before its first word (clamped at 0)
/// and ends `hang` frames after its last word. Padding is applied per chunk,
/// so neighbouring segments can overlap by a few frames in dense speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptSegmenter {
    words_per_segment: usize,
    fps: u32,
    lead_in: u32,
    hang: u32,
}

impl TranscriptSegmenter {
    pub fn new(words_per_segment: usize, fps: u32) -> Result<Self, CaptionError> {
        if words_per_segment == 0 {
            return Err(CaptionError::ZeroWordsPerSegment);
        }
        if fps == 0 {
            return Err(CaptionError::ZeroFrameRate);
        }
        Ok(Self {
            words_per_segment,
            fps,
            lead_in: CAPTION_LEAD_IN_FRAMES,
            hang: CAPTION_HANG_FRAMES,
        })
    }

    pub fn with_padding(mut self, lead_in: u32, hang: u32) -> Self {
        self.lead_in = lead_in;
        self.hang = hang;
        self
    }

    pub fn words_per_segment(&self) -> usize {
        self.words_per_segment
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Number of segments `segment` yields for `word_count` words.
    pub fn expected_segment_count(&self, word_count: usize) -> usize {
        word_count.div_ceil(self.words_per_segment)
    }

    pub fn segment(&self, words: &[Word]) -> Vec<CaptionSegment> {
        words
            .chunks(self.words_per_segment)
            .map(|chunk| self.segment_chunk(chunk))
            .collect()
    }

    fn segment_chunk(&self, chunk: &[Word]) -> CaptionSegment {
        let first = &chunk[0];
        let last = &chunk[chunk.len() - 1];
        let start = lead_in_frame(first.start_seconds(), self.fps, self.lead_in);
        let mut end = hang_frame(last.end_seconds(), self.fps, self.hang);
        if end <= start {
            // Words out of time order, or zero hang on a sub-frame word.
            log::warn!(
                "Caption '{}' ends at frame {end} before it starts at {start}; clamping to one frame",
                first.text()
            );
            end = start + 1;
        }
        let text = chunk
            .iter()
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ");
        CaptionSegment::from_ordered_bounds(start, end, text)
    }
}

impl Default for TranscriptSegmenter {
    fn default() -> Self {
        Self {
            words_per_segment: WORDS_PER_SEGMENT,
            fps: VIDEO_FPS,
            lead_in: CAPTION_LEAD_IN_FRAMES,
            hang: CAPTION_HANG_FRAMES,
        }
    }
}
