use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::article::models::ArticleId;
use crate::domain::comment::ports::CommentServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CommentResponseData;
use crate::inbound::http::router::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<ApiSuccess<Vec<CommentResponseData>>, ApiError> {
    let id = ArticleId::from_string(&article_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid article ID: {}", e)))?;

    state
        .comment_service
        .list_comments(&id)
        .await
        .map_err(ApiError::from)
        .map(|comments| {
            ApiSuccess::new(
                StatusCode::OK,
                comments.iter().map(CommentResponseData::from).collect(),
            )
        })
}
