pub mod constants;
pub mod frame_time;
