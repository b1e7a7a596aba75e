use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionError {
    #[error("word '{word}' has invalid time {value}: times must be finite and non-negative")]
    InvalidTime { word: String, value: f64 },
    #[error("word '{word}' ends at {end}s, not after its start at {start}s")]
    EmptyWordSpan { word: String, start: f64, end: f64 },
    #[error("caption '{text}' ends at frame {end}, not after its start frame {start}")]
    EmptySegmentSpan { text: String, start: u32, end: u32 },
    #[error("words per segment must be at least 1")]
    ZeroWordsPerSegment,
    #[error("frame rate must be at least 1")]
    ZeroFrameRate,
}
