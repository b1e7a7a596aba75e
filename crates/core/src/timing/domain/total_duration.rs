use super::timing_error::TimingError;

/// One scene's slot in the composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSlot {
    pub key: String,
    pub duration: u32,
    pub active: bool,
}

impl SceneSlot {
    /// A slot whose activity follows its duration: zero frames means the
    /// scene and its incoming transition are omitted.
    pub fn new(key: impl Into<String>, duration: u32) -> Self {
        Self {
            key: key.into(),
            duration,
            active: duration > 0,
        }
    }
}

pub fn active_count(slots: &[SceneSlot]) -> usize {
    slots.iter().filter(|s| s.active).count()
}

/// Transitions sit strictly between consecutive active scenes.
pub fn transitions_used(slots: &[SceneSlot]) -> usize {
    active_count(slots).saturating_sub(1)
}

/// Length of the whole composition: the sum of active scene durations minus
/// the overlap consumed by each transition.
///
/// Fails if the result is shorter than the longest active scene, which means
/// the transition length is inconsistent with the scene lengths.
pub fn total_duration(slots: &[SceneSlot], transition_frames: u32) -> Result<u32, TimingError> {
    let sum: i64 = slots
        .iter()
        .filter(|s| s.active)
        .map(|s| s.duration as i64)
        .sum();
    let overlap = transitions_used(slots) as i64 * transition_frames as i64;
    let total = sum - overlap;

    if let Some(longest) = slots.iter().filter(|s| s.active).max_by_key(|s| s.duration) {
        if total < longest.duration as i64 {
            return Err(TimingError::SceneErased {
                scene: longest.key.clone(),
                total,
                longest: longest.duration,
            });
        }
    }

    u32::try_from(total).map_err(|_| TimingError::Overflow)
}
