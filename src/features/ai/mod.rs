//! Analysis endpoints
//!
//! Runs the verification and deepfake engines against stored content, plus
//! stateless text, image-metadata, source and claim checks.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/ai/verify` | Verify stored content |
//! | POST | `/api/ai/deepfake-detect` | Deepfake detection on stored content |
//! | GET | `/api/ai/contents/{id}/analysis` | Stored analysis results |
//! | POST | `/api/ai/analyze-text` | Text misinformation analysis |
//! | POST | `/api/ai/analyze-image-metadata` | Image metadata integrity |
//! | POST | `/api/ai/check-source` | Source credibility |
//! | POST | `/api/ai/verify-claim` | Third-party fact check |
//! | GET | `/api/ai/third-party-status` | Fact-check provider status |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::AiService;
