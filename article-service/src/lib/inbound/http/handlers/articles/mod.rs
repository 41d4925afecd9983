pub mod get_article;
pub mod list_articles;
pub mod publish_article;

pub use get_article::get_article;
pub use list_articles::list_articles;
pub use publish_article::publish_article;
