use async_trait::async_trait;

use crate::domain::article::models::ArticleId;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentWithAuthor;
use crate::domain::comment::models::CreateCommentCommand;
use crate::domain::user::models::UserId;

/// Port for comment domain service operations.
#[async_trait]
pub trait CommentServicePort: Send + Sync + 'static {
    /// Post a comment on an article as `user_id`.
    ///
    /// # Errors
    /// * `ArticleNotFound` - The target article does not exist
    /// * `UserNotFound` - The commenting account no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn post_comment(
        &self,
        user_id: UserId,
        command: CreateCommentCommand,
    ) -> Result<CommentWithAuthor, CommentError>;

    /// List the comments on an article, newest first.
    ///
    /// An article without comments (or an unknown article id) yields an
    /// empty list.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_comments(
        &self,
        article_id: &ArticleId,
    ) -> Result<Vec<CommentWithAuthor>, CommentError>;
}

/// Persistence operations for comment aggregate.
#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    /// Persist new comment to storage.
    ///
    /// # Errors
    /// * `ForeignKeyViolation` - A referenced row is gone (foreign key)
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, comment: Comment) -> Result<Comment, CommentError>;

    /// Retrieve all comments on an article, newest first, joined with each
    /// commenter's full name.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_article(
        &self,
        article_id: &ArticleId,
    ) -> Result<Vec<CommentWithAuthor>, CommentError>;
}
