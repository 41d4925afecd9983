use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::article::errors::ArticleIdError;
use crate::domain::article::models::ArticleId;
use crate::domain::comment::errors::CommentContentError;
use crate::domain::comment::models::CommentContent;
use crate::domain::comment::models::CreateCommentCommand;
use crate::domain::comment::ports::CommentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CommentResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn post_comment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(body): Json<PostCommentRequest>,
) -> Result<ApiSuccess<CommentResponseData>, ApiError> {
    state
        .comment_service
        .post_comment(auth_user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref comment| ApiSuccess::new(StatusCode::CREATED, comment.into()))
}

/// HTTP request body for posting a comment (raw JSON).
///
/// Required fields default to the empty string so a missing key reports
/// the same validation error as an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostCommentRequest {
    #[serde(default)]
    article_id: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Clone, Error)]
enum ParsePostCommentRequestError {
    #[error("Invalid article ID: {0}")]
    ArticleId(#[from] ArticleIdError),

    #[error("{0}")]
    Content(#[from] CommentContentError),
}

impl PostCommentRequest {
    fn try_into_command(self) -> Result<CreateCommentCommand, ParsePostCommentRequestError> {
        let article_id = ArticleId::from_string(&self.article_id)?;
        let content = CommentContent::new(self.content)?;
        Ok(CreateCommentCommand::new(article_id, content))
    }
}

impl From<ParsePostCommentRequestError> for ApiError {
    fn from(err: ParsePostCommentRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
