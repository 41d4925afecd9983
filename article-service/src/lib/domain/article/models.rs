use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::article::errors::ArticleIdError;
use crate::domain::article::errors::ArticleQueryError;
use crate::domain::article::errors::ArticleValidationError;
use crate::domain::user::models::UserId;

/// Article aggregate entity.
///
/// A published manuscript. Every field is immutable once stored; text fields
/// keep the submitted bytes untouched.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// Display byline, free text (may differ from the account full name).
    pub author: String,
    pub abstract_text: String,
    pub keywords: String,
    pub content: String,
    pub bibliography: Option<String>,
    /// Owning account, must reference an existing user.
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Article unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticleId(pub Uuid);

impl ArticleId {
    /// Generate a new random article ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an article ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ArticleIdError> {
        Uuid::parse_str(s)
            .map(ArticleId)
            .map_err(|e| ArticleIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ArticleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Article joined with the owner's account full name.
///
/// Every read path returns this shape so clients can present both the
/// free-text byline and the registered account name.
#[derive(Debug, Clone)]
pub struct ArticleWithAuthor {
    pub article: Article,
    pub author_name: String,
}

/// Command to publish a new article.
///
/// Construction validates that all required text fields are present;
/// `bibliography` is the only optional one.
#[derive(Debug)]
pub struct CreateArticleCommand {
    pub title: String,
    pub author: String,
    pub abstract_text: String,
    pub keywords: String,
    pub content: String,
    pub bibliography: Option<String>,
}

impl CreateArticleCommand {
    /// Construct a validated publish command.
    ///
    /// # Errors
    /// * `EmptyField` - A required text field is the empty string
    pub fn new(
        title: String,
        author: String,
        abstract_text: String,
        keywords: String,
        content: String,
        bibliography: Option<String>,
    ) -> Result<Self, ArticleValidationError> {
        let required = [
            ("title", &title),
            ("author", &author),
            ("abstract", &abstract_text),
            ("keywords", &keywords),
            ("content", &content),
        ];

        for (field, value) in required {
            if value.is_empty() {
                return Err(ArticleValidationError::EmptyField { field });
            }
        }

        Ok(Self {
            title,
            author,
            abstract_text,
            keywords,
            content,
            bibliography,
        })
    }
}

/// Validated listing filter: optional search term plus 1-based pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub search: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl ArticleQuery {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Construct a validated listing query.
    ///
    /// # Errors
    /// * `InvalidPage` - `page` is zero
    /// * `InvalidPageSize` - `page_size` is zero
    pub fn new(
        search: Option<String>,
        page: u32,
        page_size: u32,
    ) -> Result<Self, ArticleQueryError> {
        if page < 1 {
            return Err(ArticleQueryError::InvalidPage);
        }
        if page_size < 1 {
            return Err(ArticleQueryError::InvalidPageSize);
        }

        Ok(Self {
            search,
            page,
            page_size,
        })
    }
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a listing, newest articles first.
#[derive(Debug, Clone)]
pub struct ArticlePage {
    pub items: Vec<ArticleWithAuthor>,
    pub total_count: i64,
    pub page: u32,
    pub total_pages: u32,
}
