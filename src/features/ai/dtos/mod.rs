mod ai_dto;

pub use ai_dto::{
    AnalyzeImageMetadataDto, AnalyzeTextRequestDto, CheckSourceDto, ContentAnalysisResponseDto,
    ContentIdDto, DeepfakeDetectResponseDto, ThirdPartyStatusResponseDto, VerifyClaimDto,
    VerifyContentResponseDto,
};
