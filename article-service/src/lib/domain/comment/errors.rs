use thiserror::Error;

use crate::domain::article::errors::ArticleIdError;
use crate::domain::article::models::ArticleId;
use crate::domain::user::models::UserId;

/// Error for CommentId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for comment content validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentContentError {
    #[error("Comment content must not be empty")]
    Empty,
}

/// Top-level error for all comment-related operations
#[derive(Debug, Clone, Error)]
pub enum CommentError {
    // Value object validation errors (automatically converted via #[from])
    #[error("{0}")]
    Validation(#[from] CommentContentError),

    #[error("Invalid article ID: {0}")]
    InvalidArticleId(#[from] ArticleIdError),

    // Domain-level errors
    #[error("Article does not exist: {0}")]
    ArticleNotFound(ArticleId),

    #[error("Commenter account not found: {0}")]
    UserNotFound(UserId),

    // Infrastructure errors
    #[error("Referenced row does not exist: {0}")]
    ForeignKeyViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
