use thiserror::Error;

use crate::domain::article::models::ArticleId;
use crate::domain::user::models::UserId;

/// Error for ArticleId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for publish command validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Error for listing query validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleQueryError {
    #[error("page must be at least 1")]
    InvalidPage,

    #[error("pageSize must be at least 1")]
    InvalidPageSize,
}

/// Top-level error for all article-related operations
#[derive(Debug, Clone, Error)]
pub enum ArticleError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid article ID: {0}")]
    InvalidArticleId(#[from] ArticleIdError),

    #[error("{0}")]
    Validation(#[from] ArticleValidationError),

    #[error("{0}")]
    InvalidQuery(#[from] ArticleQueryError),

    // Domain-level errors
    #[error("Article not found: {0}")]
    NotFound(ArticleId),

    #[error("Author account not found: {0}")]
    AuthorNotFound(UserId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
