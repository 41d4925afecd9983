use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::article::errors::ArticleQueryError;
use crate::domain::article::models::ArticlePage;
use crate::domain::article::models::ArticleQuery;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ArticleResponseData;
use crate::inbound::http::router::AppState;

pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListArticlesParams>,
) -> Result<ApiSuccess<ArticleListResponseData>, ApiError> {
    state
        .article_service
        .list_articles(params.try_into_query()?)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

/// Query string parameters for the article listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListArticlesParams {
    q: Option<String>,
    page: Option<u32>,
    #[serde(rename = "pageSize")]
    page_size: Option<u32>,
}

impl ListArticlesParams {
    fn try_into_query(self) -> Result<ArticleQuery, ArticleQueryError> {
        // An empty q filters nothing
        let search = self.q.filter(|q| !q.is_empty());

        ArticleQuery::new(
            search,
            self.page.unwrap_or(ArticleQuery::DEFAULT_PAGE),
            self.page_size.unwrap_or(ArticleQuery::DEFAULT_PAGE_SIZE),
        )
    }
}

impl From<ArticleQueryError> for ApiError {
    fn from(err: ArticleQueryError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleListResponseData {
    pub articles: Vec<ArticleResponseData>,
    pub total: i64,
    pub page: u32,
    pub pages: u32,
}

impl From<&ArticlePage> for ArticleListResponseData {
    fn from(page: &ArticlePage) -> Self {
        Self {
            articles: page.items.iter().map(ArticleResponseData::from).collect(),
            total: page.total_count,
            page: page.page,
            pages: page.total_pages,
        }
    }
}
