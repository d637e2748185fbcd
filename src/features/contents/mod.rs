//! Content uploads
//!
//! Uploaded bytes and client metadata are stored in the `contents` table; the
//! analysis endpoints in `ai` write their results back onto the same row.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/contents` | Upload content (multipart) |
//! | POST | `/api/contents/url` | Download content from a URL and store it |
//! | GET | `/api/contents/{id}` | Get a content record |

pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ContentService;
