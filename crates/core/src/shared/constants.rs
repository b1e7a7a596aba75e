pub const VIDEO_FPS: u32 = 30;

/// Words grouped into one caption segment.
pub const WORDS_PER_SEGMENT: usize = 8;

/// Frames a caption appears before its first word is spoken.
pub const CAPTION_LEAD_IN_FRAMES: u32 = 1;
/// Frames a caption stays on screen after its last word ends.
pub const CAPTION_HANG_FRAMES: u32 = 6;

/// Placeholder window used when the transcription service returns no words.
pub const FALLBACK_CAPTION_START: u32 = 10;
pub const FALLBACK_CAPTION_END: u32 = 140;

/// Frames of silence after the last caption of a scene.
pub const DURATION_BUFFER: u32 = 45;
/// Frames consumed by each transition between two active scenes (~0.83s).
pub const TRANSITION_DURATION: u32 = 25;
/// Captions are hidden for this many frames at scene start (covers the incoming transition).
pub const CAPTION_TRANSITION_GUARD: u32 = 14;

pub const DEFAULT_VOICE: &str = "onyx";
pub const DEFAULT_SPEED: f64 = 0.95;

pub const DEFAULT_TTS_DEPLOYMENT: &str = "tts-hd";
pub const DEFAULT_WHISPER_DEPLOYMENT: &str = "whisper";
pub const AUDIO_API_VERSION: &str = "2025-04-01-preview";
pub const DEPLOYMENTS_API_VERSION: &str = "2024-02-01";

pub const AUDIO_EXTENSION: &str = "mp3";
pub const NARRATION_TABLE_FILENAME: &str = "narration.json";
pub const DURATION_STORE_FILENAME: &str = "durations.json";
