use super::timing_error::TimingError;
use super::total_duration::SceneSlot;

/// Where an active scene sits in the composition timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledScene {
    pub key: String,
    pub start_frame: u32,
    pub duration: u32,
}

impl ScheduledScene {
    pub fn end_frame(&self) -> u32 {
        self.start_frame + self.duration
    }
}

/// Lays active scenes end to end, each one starting `transition_frames`
/// before its predecessor ends. Inactive scenes are skipped entirely.
///
/// The last scene's end frame equals the composition's total duration.
pub fn schedule(
    slots: &[SceneSlot],
    transition_frames: u32,
) -> Result<Vec<ScheduledScene>, TimingError> {
    let active: Vec<&SceneSlot> = slots.iter().filter(|s| s.active).collect();
    let mut scheduled = Vec::with_capacity(active.len());
    let mut cursor: u32 = 0;

    for (i, slot) in active.iter().enumerate() {
        let has_neighbour = active.len() > 1;
        if has_neighbour && slot.duration < transition_frames {
            return Err(TimingError::TransitionTooLong {
                scene: slot.key.clone(),
                transition: transition_frames,
                duration: slot.duration,
            });
        }
        if i > 0 {
            cursor -= transition_frames;
        }
        scheduled.push(ScheduledScene {
            key: slot.key.clone(),
            start_frame: cursor,
            duration: slot.duration,
        });
        cursor = cursor
            .checked_add(slot.duration)
            .ok_or(TimingError::Overflow)?;
    }

    Ok(scheduled)
}
