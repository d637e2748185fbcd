mod content_dto;

pub use content_dto::{
    is_content_type_allowed, parse_metadata, validate_upload, validate_uploaded_by,
    ContentResponseDto, UploadContentDto, UploadFromUrlDto, ALLOWED_CONTENT_TYPES,
    MAX_CONTENT_SIZE, MAX_FILENAME_LENGTH, MAX_UPLOADER_LENGTH,
};
