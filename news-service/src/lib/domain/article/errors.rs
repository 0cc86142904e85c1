use thiserror::Error;

use crate::domain::access::errors::AccessError;
use crate::domain::article::models::ArticleId;
use crate::domain::source::models::SourceId;
use crate::domain::validation::ValidationError;

/// Top-level error type for all article-related operations
#[derive(Debug, Clone, Error)]
pub enum ArticleError {
    #[error("Invalid article: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Article not found: {0}")]
    NotFound(ArticleId),

    #[error("Source not found: {0}")]
    SourceNotFound(SourceId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
