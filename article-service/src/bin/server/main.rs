use std::sync::Arc;

use article_service::config::Config;
use article_service::domain::article::service::ArticleService;
use article_service::domain::comment::service::CommentService;
use article_service::domain::user::service::UserService;
use article_service::inbound::http::router::cors_layer;
use article_service::inbound::http::router::create_router;
use article_service::outbound::repositories::SqliteArticleRepository;
use article_service::outbound::repositories::SqliteCommentRepository;
use article_service::outbound::repositories::SqliteUserRepository;
use auth::Authenticator;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteJournalMode;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "article_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "article-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_path = %config.database.path,
        port = config.server.port,
        run_mode = %config.run_mode,
        "Configuration loaded"
    );

    let connect_options = SqliteConnectOptions::new()
        .filename(&config.database.path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "sqlite",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let article_repository = Arc::new(SqliteArticleRepository::new(pool.clone()));
    let comment_repository = Arc::new(SqliteCommentRepository::new(pool));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let article_service = Arc::new(ArticleService::new(
        Arc::clone(&article_repository),
        Arc::clone(&user_repository),
    ));
    let comment_service = Arc::new(CommentService::new(
        comment_repository,
        article_repository,
        user_repository,
    ));

    let address = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(
        user_service,
        article_service,
        comment_service,
        authenticator,
        config.jwt.expiration_hours,
        cors_layer(&config),
    );

    axum::serve(listener, application).await?;

    Ok(())
}
