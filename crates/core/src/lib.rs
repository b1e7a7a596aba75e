pub mod captions;
pub mod output;
pub mod pipeline;
pub mod scenes;
pub mod shared;
pub mod speech;
pub mod timing;
