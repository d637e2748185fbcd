mod stream_handler;

pub use stream_handler::{
    __path_analyze_live_text, __path_get_stream_status, __path_list_streams,
    __path_process_chunk, __path_start_stream, __path_stop_stream, analyze_live_text,
    get_stream_status, list_streams, process_chunk, start_stream, stop_stream,
};
