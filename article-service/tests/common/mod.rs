use std::path::PathBuf;
use std::sync::Arc;

use article_service::domain::article::service::ArticleService;
use article_service::domain::comment::service::CommentService;
use article_service::domain::user::service::UserService;
use article_service::inbound::http::router::create_router;
use article_service::outbound::repositories::SqliteArticleRepository;
use article_service::outbound::repositories::SqliteCommentRepository;
use article_service::outbound::repositories::SqliteUserRepository;
use auth::Authenticator;
use auth::JwtHandler;
use reqwest::StatusCode;
use serde_json::json;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteJournalMode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Test database helper backed by a temp file, removed on drop
pub struct TestDb {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Wire repositories and services against the test pool
        let user_repository = Arc::new(SqliteUserRepository::new(db.pool.clone()));
        let article_repository = Arc::new(SqliteArticleRepository::new(db.pool.clone()));
        let comment_repository = Arc::new(SqliteCommentRepository::new(db.pool.clone()));

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

        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));

        let router = create_router(
            user_service,
            article_service,
            comment_service,
            authenticator,
            24,
            CorsLayer::permissive(),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler = JwtHandler::new(TEST_JWT_SECRET);

        Self {
            address,
            db,
            api_client: reqwest::Client::new(),
            jwt_handler,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register an account and return (user_id, token)
    pub async fn register_user(
        &self,
        fullname: &str,
        email: &str,
        password: &str,
    ) -> (String, String) {
        let response = self
            .post("/api/register")
            .json(&json!({
                "fullname": fullname,
                "email": email,
                "password": password,
                "institution": "Test University"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let user_id = body["user"]["id"]
            .as_str()
            .expect("Missing user id")
            .to_string();
        let token = body["token"].as_str().expect("Missing token").to_string();

        (user_id, token)
    }

    /// Publish an article as the given account and return the article id
    pub async fn publish_article(&self, token: &str, title: &str) -> String {
        let response = self
            .post_authenticated("/api/articles", token)
            .json(&json!({
                "title": title,
                "author": "A. Researcher",
                "abstract": "A short abstract.",
                "keywords": "testing",
                "content": "Full text."
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["id"].as_str().expect("Missing article id").to_string()
    }

    /// Mint a token for the given account that expired an hour ago
    pub fn expired_token(&self, user_id: &str, email: &str) -> String {
        let claims = auth::Claims::for_user(user_id, email, -1);
        self.jwt_handler
            .encode(&claims)
            .expect("Failed to encode token")
    }
}

impl TestDb {
    /// Create a new test database file with a unique name
    pub async fn new() -> Self {
        let path = std::env::temp_dir().join(format!("articles_test_{}.db", uuid::Uuid::new_v4()));

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, path }
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // WAL mode leaves side files next to the database
        let _ = std::fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = std::fs::remove_file(&side);
        }
    }
}
