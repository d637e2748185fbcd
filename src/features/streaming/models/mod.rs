mod stream;

pub use stream::{
    ChunkResult, StreamChunk, StreamSession, StreamState, StreamStatus, StreamSummary,
    TextChunkResult, VideoChunkResult,
};
