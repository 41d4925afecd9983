use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ArticleResponseData;
use crate::inbound::http::router::AppState;

pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let id = ArticleId::from_string(&article_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid article ID: {}", e)))?;

    state
        .article_service
        .get_article(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::OK, article.into()))
}
