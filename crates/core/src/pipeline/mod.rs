pub mod generate_narration_use_case;
pub mod infrastructure;
pub mod narration_executor;
pub mod pipeline_error;
pub mod pipeline_logger;
pub mod sync_durations_use_case;

#[cfg(test)]
mod stubs;
