pub mod article;
pub mod comment;
pub mod user;

pub use article::SqliteArticleRepository;
pub use comment::SqliteCommentRepository;
pub use user::SqliteUserRepository;
