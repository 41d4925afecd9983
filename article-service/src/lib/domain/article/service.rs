use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::ArticleError;
use super::models::Article;
use super::models::ArticleId;
use super::models::ArticlePage;
use super::models::ArticleQuery;
use super::models::ArticleWithAuthor;
use super::models::CreateArticleCommand;
use super::ports::ArticleRepository;
use super::ports::ArticleServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Concrete implementation of ArticleServicePort.
///
/// Publishing re-checks the owning account so a token that outlived its
/// user row is reported as a stale session instead of a storage failure.
pub struct ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    article_repository: Arc<AR>,
    user_repository: Arc<UR>,
}

impl<AR, UR> ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    /// Create a new article service with injected dependencies.
    ///
    /// # Arguments
    /// * `article_repository` - Article persistence implementation
    /// * `user_repository` - User repository for owner validation
    ///
    /// # Returns
    /// Configured article service instance
    pub fn new(article_repository: Arc<AR>, user_repository: Arc<UR>) -> Self {
        Self {
            article_repository,
            user_repository,
        }
    }
}

#[async_trait]
impl<AR, UR> ArticleServicePort for ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    async fn publish_article(
        &self,
        user_id: UserId,
        command: CreateArticleCommand,
    ) -> Result<ArticleWithAuthor, ArticleError> {
        // Verify the owning account still exists
        let user = self
            .user_repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
            .ok_or(ArticleError::AuthorNotFound(user_id))?;

        let article = Article {
            id: ArticleId::new(),
            title: command.title,
            author: command.author,
            abstract_text: command.abstract_text,
            keywords: command.keywords,
            content: command.content,
            bibliography: command.bibliography,
            user_id,
            created_at: Utc::now(),
        };

        let created_article = self.article_repository.create(article).await?;

        Ok(ArticleWithAuthor {
            article: created_article,
            author_name: user.fullname.as_str().to_string(),
        })
    }

    async fn list_articles(&self, query: ArticleQuery) -> Result<ArticlePage, ArticleError> {
        self.article_repository.list(&query).await
    }

    async fn get_article(&self, id: &ArticleId) -> Result<ArticleWithAuthor, ArticleError> {
        self.article_repository
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(*id))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::article::errors::ArticleQueryError;
    use crate::domain::article::errors::ArticleValidationError;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::FullName;
    use crate::domain::user::models::User;

    mock! {
        pub TestArticleRepository {}

        #[async_trait]
        impl ArticleRepository for TestArticleRepository {
            async fn create(&self, article: Article) -> Result<Article, ArticleError>;
            async fn find_by_id(&self, id: &ArticleId) -> Result<Option<ArticleWithAuthor>, ArticleError>;
            async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, ArticleError>;
        }
    }

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        }
    }

    fn sample_user(id: UserId) -> User {
        User {
            id,
            fullname: FullName::new("Grace Hopper".to_string()).unwrap(),
            email: EmailAddress::new("grace@example.edu".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            institution: None,
            created_at: Utc::now(),
        }
    }

    fn sample_command() -> CreateArticleCommand {
        CreateArticleCommand::new(
            "On Compiler Construction".to_string(),
            "G. Hopper".to_string(),
            "A study of automatic programming.".to_string(),
            "compilers, languages".to_string(),
            "Full manuscript text.".to_string(),
            Some("[1] A-0 System Manual".to_string()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_publish_article_success() {
        let mut article_repository = MockTestArticleRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let user = sample_user(user_id);

        user_repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        article_repository
            .expect_create()
            .withf(move |article| {
                article.title == "On Compiler Construction"
                    && article.author == "G. Hopper"
                    && article.user_id == user_id
            })
            .times(1)
            .returning(|article| Ok(article));

        let service = ArticleService::new(Arc::new(article_repository), Arc::new(user_repository));

        let result = service.publish_article(user_id, sample_command()).await;
        assert!(result.is_ok());

        let published = result.unwrap();
        assert_eq!(published.article.title, "On Compiler Construction");
        assert_eq!(published.article.bibliography.as_deref(), Some("[1] A-0 System Manual"));
        assert_eq!(published.author_name, "Grace Hopper");
    }

    #[tokio::test]
    async fn test_publish_article_author_missing() {
        let mut article_repository = MockTestArticleRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        user_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        // The stale session must be detected before any row is written
        article_repository.expect_create().times(0);

        let service = ArticleService::new(Arc::new(article_repository), Arc::new(user_repository));

        let result = service.publish_article(UserId::new(), sample_command()).await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ArticleError::AuthorNotFound(_)
        ));
    }

    #[test]
    fn test_publish_command_rejects_empty_fields() {
        let command = CreateArticleCommand::new(
            "Title".to_string(),
            "Author".to_string(),
            "".to_string(),
            "keywords".to_string(),
            "content".to_string(),
            None,
        );

        assert_eq!(
            command.unwrap_err(),
            ArticleValidationError::EmptyField { field: "abstract" }
        );
    }

    #[test]
    fn test_article_query_requires_positive_paging() {
        assert_eq!(
            ArticleQuery::new(None, 0, 10).unwrap_err(),
            ArticleQueryError::InvalidPage
        );
        assert_eq!(
            ArticleQuery::new(None, 1, 0).unwrap_err(),
            ArticleQueryError::InvalidPageSize
        );
        assert!(ArticleQuery::new(Some("sorting".to_string()), 1, 1).is_ok());
    }

    #[tokio::test]
    async fn test_get_article_success() {
        let mut article_repository = MockTestArticleRepository::new();
        let user_repository = MockTestUserRepository::new();

        let article_id = ArticleId::new();
        let found = ArticleWithAuthor {
            article: Article {
                id: article_id,
                title: "On Compiler Construction".to_string(),
                author: "G. Hopper".to_string(),
                abstract_text: "A study.".to_string(),
                keywords: "compilers".to_string(),
                content: "Text.".to_string(),
                bibliography: None,
                user_id: UserId::new(),
                created_at: Utc::now(),
            },
            author_name: "Grace Hopper".to_string(),
        };

        let returned = found.clone();
        article_repository
            .expect_find_by_id()
            .withf(move |id| *id == article_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = ArticleService::new(Arc::new(article_repository), Arc::new(user_repository));

        let result = service.get_article(&article_id).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().article.id, article_id);
    }

    #[tokio::test]
    async fn test_get_article_not_found() {
        let mut article_repository = MockTestArticleRepository::new();
        let user_repository = MockTestUserRepository::new();

        article_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ArticleService::new(Arc::new(article_repository), Arc::new(user_repository));

        let result = service.get_article(&ArticleId::new()).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ArticleError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_articles_passes_query_through() {
        let mut article_repository = MockTestArticleRepository::new();
        let user_repository = MockTestUserRepository::new();

        let query = ArticleQuery::new(Some("compilers".to_string()), 2, 5).unwrap();
        let expected_query = query.clone();

        article_repository
            .expect_list()
            .withf(move |q| *q == expected_query)
            .times(1)
            .returning(|q| {
                Ok(ArticlePage {
                    items: vec![],
                    total_count: 0,
                    page: q.page,
                    total_pages: 0,
                })
            });

        let service = ArticleService::new(Arc::new(article_repository), Arc::new(user_repository));

        let result = service.list_articles(query).await;
        assert!(result.is_ok());

        let page = result.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_count, 0);
    }
}
