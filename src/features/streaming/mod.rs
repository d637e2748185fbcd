//! Stream registry
//!
//! Open streams live in memory; each chunk is handed to the processor
//! registered for the stream's content type.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/streams` | Start a stream |
//! | GET | `/api/streams` | List active streams |
//! | GET | `/api/streams/{id}` | Stream status |
//! | POST | `/api/streams/{id}/chunks` | Process a chunk |
//! | POST | `/api/streams/{id}/stop` | Stop a stream |
//! | POST | `/api/streams/live-text` | One-shot live text analysis |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::StreamService;
