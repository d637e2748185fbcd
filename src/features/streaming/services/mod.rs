mod chunk_processor;
mod stream_service;

pub use chunk_processor::{
    ChunkProcessor, TextStreamProcessor, VideoStreamProcessor, TEXT_STREAM, VIDEO_STREAM,
};
pub use stream_service::{StreamError, StreamService};
