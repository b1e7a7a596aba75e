pub mod sequential_narration_executor;
pub mod threaded_narration_executor;
