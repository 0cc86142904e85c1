use thiserror::Error;

use crate::domain::access::errors::AccessError;
use crate::domain::source::models::SourceId;
use crate::domain::validation::ValidationError;

/// Top-level error type for all source-related operations
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Invalid source: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Source not found: {0}")]
    NotFound(SourceId),

    #[error("Source url already exists: {0}")]
    UrlAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
