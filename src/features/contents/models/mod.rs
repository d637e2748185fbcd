mod content;

pub use content::{Content, ContentStatus, StoredContent};
