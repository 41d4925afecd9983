use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_article;
use super::handlers::get_profile;
use super::handlers::list_articles;
use super::handlers::list_comments;
use super::handlers::login;
use super::handlers::post_comment;
use super::handlers::publish_article;
use super::handlers::register;
use super::middleware::authenticate as auth_middleware;
use crate::config::Config;
use crate::domain::article::service::ArticleService;
use crate::domain::comment::service::CommentService;
use crate::domain::user::service::UserService;
use crate::inbound::http::handlers::ApiError;
use crate::outbound::repositories::article::SqliteArticleRepository;
use crate::outbound::repositories::comment::SqliteCommentRepository;
use crate::outbound::repositories::user::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<SqliteUserRepository>>,
    pub article_service: Arc<ArticleService<SqliteArticleRepository, SqliteUserRepository>>,
    pub comment_service: Arc<
        CommentService<SqliteCommentRepository, SqliteArticleRepository, SqliteUserRepository>,
    >,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
}

pub fn create_router(
    user_service: Arc<UserService<SqliteUserRepository>>,
    article_service: Arc<ArticleService<SqliteArticleRepository, SqliteUserRepository>>,
    comment_service: Arc<
        CommentService<SqliteCommentRepository, SqliteArticleRepository, SqliteUserRepository>,
    >,
    authenticator: Arc<Authenticator>,
    jwt_expiration_hours: i64,
    cors: CorsLayer,
) -> Router {
    let state = AppState {
        user_service,
        article_service,
        comment_service,
        authenticator,
        jwt_expiration_hours,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/articles", get(list_articles))
        .route("/api/articles/:article_id", get(get_article))
        .route("/api/articles/:article_id/comments", get(list_comments));

    let protected_routes = Router::new()
        .route("/api/profile", get(get_profile))
        .route("/api/articles", post(publish_article))
        .route("/api/comments", post(post_comment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                headers = ?request.headers(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer for the configured run mode.
///
/// Development stays permissive. Production answers only for the configured
/// origin; with no valid origin configured, cross-origin requests are refused.
pub fn cors_layer(config: &Config) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::permissive();
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match config.server.cors_origin.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!(origin, "Invalid cors_origin, cross-origin requests disabled");
                layer
            }
        },
        None => {
            tracing::warn!("No cors_origin configured, cross-origin requests disabled");
            layer
        }
    }
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}
