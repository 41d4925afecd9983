pub mod articles;
pub mod comments;
pub mod users;

// Re-export handlers for easy access
pub use articles::get_article;
pub use articles::list_articles;
pub use articles::publish_article;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
pub use comments::list_comments;
pub use comments::post_comment;
use serde::Serialize;
pub use users::get_profile;
pub use users::login;
pub use users::register;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleWithAuthor;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::CommentWithAuthor;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;

/// Success response carrying the payload as the raw JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                // Log the detail, return a generic body
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound(err.to_string())
            }
            // Fixed body, the registered address stays out of the response
            UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict("Email already registered".to_string())
            }
            UserError::InvalidUserId(_)
            | UserError::InvalidFullName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::BadRequest(err.to_string()),
            UserError::PasswordHash(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::InvalidArticleId(_)
            | ArticleError::Validation(_)
            | ArticleError::InvalidQuery(_) => ApiError::BadRequest(err.to_string()),
            ArticleError::NotFound(_) => ApiError::NotFound(err.to_string()),
            // A valid token whose account row has since been deleted
            ArticleError::AuthorNotFound(_) => {
                ApiError::BadRequest("Account no longer exists, please log in again".to_string())
            }
            ArticleError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::Validation(_)
            | CommentError::InvalidArticleId(_)
            | CommentError::ArticleNotFound(_)
            | CommentError::ForeignKeyViolation(_) => ApiError::BadRequest(err.to_string()),
            CommentError::UserNotFound(_) => {
                ApiError::BadRequest("Account no longer exists, please log in again".to_string())
            }
            CommentError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// User fields shared by the register and login responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub fullname: String,
    pub institution: Option<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            fullname: user.fullname.as_str().to_string(),
            institution: user.institution.clone(),
        }
    }
}

/// Article representation returned by every article endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleResponseData {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: String,
    pub content: String,
    pub bibliography: Option<String>,
    pub user_id: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ArticleWithAuthor> for ArticleResponseData {
    fn from(record: &ArticleWithAuthor) -> Self {
        Self {
            id: record.article.id.to_string(),
            title: record.article.title.clone(),
            author: record.article.author.clone(),
            abstract_text: record.article.abstract_text.clone(),
            keywords: record.article.keywords.clone(),
            content: record.article.content.clone(),
            bibliography: record.article.bibliography.clone(),
            user_id: record.article.user_id.to_string(),
            author_name: record.author_name.clone(),
            created_at: record.article.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentResponseData {
    pub id: String,
    pub article_id: String,
    pub user_id: String,
    pub content: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CommentWithAuthor> for CommentResponseData {
    fn from(record: &CommentWithAuthor) -> Self {
        Self {
            id: record.comment.id.to_string(),
            article_id: record.comment.article_id.to_string(),
            user_id: record.comment.user_id.to_string(),
            content: record.comment.content.as_str().to_string(),
            author_name: record.author_name.clone(),
            created_at: record.comment.created_at,
        }
    }
}
