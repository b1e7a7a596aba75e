pub mod pipeline_settings;
pub mod scene_spec;
