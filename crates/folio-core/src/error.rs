//! Error types for Folio.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Article not found: {0}")]
    ArticleNotFound(Uuid),

    #[error("Slug already in use: {0}")]
    SlugConflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid stored timestamp: {0}")]
    TimestampParse(String),

    #[error("Invalid stored value: {0}")]
    InvalidStoredValue(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
