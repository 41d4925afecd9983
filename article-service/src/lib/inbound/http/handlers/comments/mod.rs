pub mod list_comments;
pub mod post_comment;

pub use list_comments::list_comments;
pub use post_comment::post_comment;
