pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::article::models::*;
pub use domain::article::service::ArticleService;
pub use domain::comment::models::*;
pub use domain::comment::service::CommentService;
pub use domain::user::models::UserId;
pub use domain::user::service::UserService;
