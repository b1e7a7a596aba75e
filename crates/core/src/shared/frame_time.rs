//! Conversions between continuous time and discrete frame numbers.
//!
//! The renderer only ever sees integer frames at a fixed rate, so every
//! caption bound and scene length passes through these helpers exactly once.

/// Nearest frame to `seconds` at `fps`. Halves round up, matching how the
/// renderer's timeline snaps audio cues.
pub fn seconds_to_frame(seconds: f64, fps: u32) -> u32 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * fps as f64).round() as u32
}

pub fn frames_to_seconds(frames: u32, fps: u32) -> f64 {
    if fps == 0 {
        return 0.0;
    }
    frames as f64 / fps as f64
}

/// Frame at which a caption should appear: `lead_in` frames before the word, clamped to 0.
pub fn lead_in_frame(seconds: f64, fps: u32, lead_in: u32) -> u32 {
    seconds_to_frame(seconds, fps).saturating_sub(lead_in)
}

/// Frame at which a caption should disappear: `hang` frames after the word ends.
pub fn hang_frame(seconds: f64, fps: u32, hang: u32) -> u32 {
    seconds_to_frame(seconds, fps).saturating_add(hang)
}
