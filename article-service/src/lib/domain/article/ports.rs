use async_trait::async_trait;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticlePage;
use crate::domain::article::models::ArticleQuery;
use crate::domain::article::models::ArticleWithAuthor;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::user::models::UserId;

/// Port for article domain service operations.
#[async_trait]
pub trait ArticleServicePort: Send + Sync + 'static {
    /// Publish a new article owned by `user_id`.
    ///
    /// # Errors
    /// * `AuthorNotFound` - The owning account no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn publish_article(
        &self,
        user_id: UserId,
        command: CreateArticleCommand,
    ) -> Result<ArticleWithAuthor, ArticleError>;

    /// Retrieve one page of articles, optionally filtered by a search term.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_articles(&self, query: ArticleQuery) -> Result<ArticlePage, ArticleError>;

    /// Retrieve a single article by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_article(&self, id: &ArticleId) -> Result<ArticleWithAuthor, ArticleError>;
}

/// Persistence operations for article aggregate.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// Persist new article to storage.
    ///
    /// # Errors
    /// * `AuthorNotFound` - The referenced user row is gone (foreign key)
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, article: Article) -> Result<Article, ArticleError>;

    /// Retrieve article by identifier, joined with the owner's full name.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<ArticleWithAuthor>, ArticleError>;

    /// Retrieve one page of articles matching the query, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, ArticleError>;
}
