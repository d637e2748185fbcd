mod ml_handler;

pub use ml_handler::{
    __path_activate_model, __path_analyze_image, __path_analyze_text, __path_list_models,
    __path_load_model, __path_model_performance, __path_train_model, activate_model,
    analyze_image, analyze_text, list_models, load_model, model_performance, train_model,
};
