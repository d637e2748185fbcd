mod ai_handler;

pub use ai_handler::{
    __path_analyze_image_metadata, __path_analyze_text, __path_check_source,
    __path_detect_deepfake, __path_get_content_analysis, __path_third_party_status,
    __path_verify_claim, __path_verify_content, analyze_image_metadata, analyze_text,
    check_source, detect_deepfake, get_content_analysis, third_party_status, verify_claim,
    verify_content,
};
