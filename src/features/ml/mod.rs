//! ML model registry
//!
//! Versioned text and image analysis models with an active version per type
//! and an in-memory performance log.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/ml/analyze-text` | Run the text model |
//! | POST | `/api/ml/analyze-image` | Run the image model on an upload |
//! | GET | `/api/ml/models` | Registered versions and active versions |
//! | POST | `/api/ml/models/{model_type}/load` | Load a model version |
//! | POST | `/api/ml/models/{model_type}/activate` | Change the active version |
//! | POST | `/api/ml/models/{model_type}/train` | Simulated training run |
//! | GET | `/api/ml/models/{model_type}/performance` | Prediction and training history |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::{ModelError, ModelManager};
