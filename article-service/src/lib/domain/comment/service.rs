use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::CommentError;
use super::models::Comment;
use super::models::CommentId;
use super::models::CommentWithAuthor;
use super::models::CreateCommentCommand;
use super::ports::CommentRepository;
use super::ports::CommentServicePort;
use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Concrete implementation of CommentServicePort.
///
/// Posting verifies both referenced rows up front so the caller gets a
/// precise error and no comment row is written on failure.
pub struct CommentService<CR, AR, UR>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
{
    comment_repository: Arc<CR>,
    article_repository: Arc<AR>,
    user_repository: Arc<UR>,
}

impl<CR, AR, UR> CommentService<CR, AR, UR>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
{
    /// Create a new comment service with injected dependencies.
    ///
    /// # Arguments
    /// * `comment_repository` - Comment persistence implementation
    /// * `article_repository` - Article repository for target validation
    /// * `user_repository` - User repository for commenter validation
    ///
    /// # Returns
    /// Configured comment service instance
    pub fn new(
        comment_repository: Arc<CR>,
        article_repository: Arc<AR>,
        user_repository: Arc<UR>,
    ) -> Self {
        Self {
            comment_repository,
            article_repository,
            user_repository,
        }
    }
}

#[async_trait]
impl<CR, AR, UR> CommentServicePort for CommentService<CR, AR, UR>
where
    CR: CommentRepository,
    AR: ArticleRepository,
    UR: UserRepository,
{
    async fn post_comment(
        &self,
        user_id: UserId,
        command: CreateCommentCommand,
    ) -> Result<CommentWithAuthor, CommentError> {
        // Verify the commenting account still exists
        let user = self
            .user_repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| CommentError::DatabaseError(e.to_string()))?
            .ok_or(CommentError::UserNotFound(user_id))?;

        // Verify the target article exists
        self.article_repository
            .find_by_id(&command.article_id)
            .await
            .map_err(|e| CommentError::DatabaseError(e.to_string()))?
            .ok_or(CommentError::ArticleNotFound(command.article_id))?;

        let comment = Comment {
            id: CommentId::new(),
            article_id: command.article_id,
            user_id,
            content: command.content,
            created_at: Utc::now(),
        };

        let created_comment = self.comment_repository.create(comment).await?;

        Ok(CommentWithAuthor {
            comment: created_comment,
            author_name: user.fullname.as_str().to_string(),
        })
    }

    async fn list_comments(
        &self,
        article_id: &ArticleId,
    ) -> Result<Vec<CommentWithAuthor>, CommentError> {
        self.comment_repository.find_by_article(article_id).await
    }
}
