mod ml_dto;

pub use ml_dto::{
    ActivateModelDto, ActivateModelResponseDto, AnalyzeImageDto, AnalyzeTextDto,
    ImageAnalysisResponseDto, ListModelsQuery, LoadModelQuery, LoadModelResponseDto,
    ModelListResponseDto, TextAnalysisResponseDto, TrainModelDto, TrainModelResponseDto,
    MAX_IMAGE_SIZE,
};
