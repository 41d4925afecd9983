use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::article::models::ArticleId;
use crate::domain::comment::errors::CommentContentError;
use crate::domain::comment::errors::CommentIdError;
use crate::domain::user::models::UserId;

/// Comment aggregate entity.
///
/// A reader remark attached to one article. Immutable once stored.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub content: CommentContent,
    pub created_at: DateTime<Utc>,
}

/// Comment unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub Uuid);

impl CommentId {
    /// Generate a new random comment ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a comment ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CommentIdError> {
        Uuid::parse_str(s)
            .map(CommentId)
            .map_err(|e| CommentIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Comment content value type, rejects the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    /// Create validated comment content.
    ///
    /// # Errors
    /// * `Empty` - Content is the empty string
    pub fn new(content: String) -> Result<Self, CommentContentError> {
        if content.is_empty() {
            return Err(CommentContentError::Empty);
        }
        Ok(Self(content))
    }

    /// Get content as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Comment joined with the commenter's account full name.
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_name: String,
}

/// Command to post a comment on an article.
#[derive(Debug)]
pub struct CreateCommentCommand {
    pub article_id: ArticleId,
    pub content: CommentContent,
}

impl CreateCommentCommand {
    /// Construct a new post comment command from validated parts.
    pub fn new(article_id: ArticleId, content: CommentContent) -> Self {
        Self {
            article_id,
            content,
        }
    }
}
