mod stream_dto;

pub use stream_dto::{
    ChunkProcessedResponseDto, LiveTextDto, LiveTextResponseDto, StartStreamDto,
    StreamListResponseDto,
};
