use std::io;

use gagyebu_domain::EntryId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
