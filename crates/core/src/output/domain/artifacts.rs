use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::captions::domain::scene_narration::SceneNarration;

/// Generated caption table: scene key to narration text and caption timeline.
///
/// Regenerated wholesale on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationTable {
    pub fps: u32,
    pub scenes: BTreeMap<String, SceneNarration>,
}

/// Structured duration store read by the renderer: one frame count per scene
/// plus the composition total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRecord {
    pub fps: u32,
    pub transition_frames: u32,
    pub scenes: BTreeMap<String, u32>,
    pub total: u32,
}

/// A named numeric constant to rewrite in hand-authored renderer source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantPatch {
    pub name: String,
    pub value: u32,
}
