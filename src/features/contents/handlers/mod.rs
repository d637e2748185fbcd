mod content_handler;

pub use content_handler::{
    __path_get_content, __path_upload_content, __path_upload_content_from_url, get_content,
    upload_content, upload_content_from_url,
};
