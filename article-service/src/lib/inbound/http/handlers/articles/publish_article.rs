use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::article::errors::ArticleValidationError;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ArticleResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn publish_article(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<PublishArticleRequest>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    state
        .article_service
        .publish_article(auth_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::CREATED, article.into()))
}

/// HTTP request body for publishing an article (raw JSON).
///
/// Required fields default to the empty string so a missing key reports
/// the same validation error as an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishArticleRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default, rename = "abstract")]
    abstract_text: String,
    #[serde(default)]
    keywords: String,
    #[serde(default)]
    content: String,
    bibliography: Option<String>,
}

impl PublishArticleRequest {
    fn try_into_command(self) -> Result<CreateArticleCommand, ArticleValidationError> {
        CreateArticleCommand::new(
            self.title,
            self.author,
            self.abstract_text,
            self.keywords,
            self.content,
            self.bibliography,
        )
    }
}

impl From<ArticleValidationError> for ApiError {
    fn from(err: ArticleValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
