pub mod caption_error;
pub mod caption_segment;
pub mod scene_narration;
pub mod transcript;
pub mod transcript_segmenter;
