pub mod composition_schedule;
pub mod scene_duration;
pub mod timing_error;
pub mod total_duration;
