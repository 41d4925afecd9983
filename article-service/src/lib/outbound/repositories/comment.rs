use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use sqlx::SqlitePool;

use crate::domain::article::models::ArticleId;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentContent;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CommentWithAuthor;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::user::models::UserId;

pub struct SqliteCommentRepository {
    pool: SqlitePool,
}

impl SqliteCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_comment(row: &SqliteRow) -> Result<CommentWithAuthor, CommentError> {
        let id: String = row.get("id");
        let article_id: String = row.get("article_id");
        let user_id: String = row.get("user_id");
        let content: String = row.get("content");
        let created_at: DateTime<Utc> = row.get("created_at");

        let comment = Comment {
            id: CommentId::from_string(&id)
                .map_err(|e| CommentError::DatabaseError(e.to_string()))?,
            article_id: ArticleId::from_string(&article_id)
                .map_err(|e| CommentError::DatabaseError(e.to_string()))?,
            user_id: UserId::from_string(&user_id)
                .map_err(|e| CommentError::DatabaseError(e.to_string()))?,
            content: CommentContent::new(content)?,
            created_at,
        };

        Ok(CommentWithAuthor {
            comment,
            author_name: row.get("author_name"),
        })
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, CommentError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, article_id, user_id, content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(comment.id.to_string())
        .bind(comment.article_id.to_string())
        .bind(comment.user_id.to_string())
        .bind(comment.content.as_str())
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return CommentError::ForeignKeyViolation(e.to_string());
                }
            }
            CommentError::DatabaseError(e.to_string())
        })?;

        Ok(comment)
    }

    async fn find_by_article(
        &self,
        article_id: &ArticleId,
    ) -> Result<Vec<CommentWithAuthor>, CommentError> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.article_id, c.user_id, c.content, c.created_at,
                   u.fullname AS author_name
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.article_id = ?1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(article_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_comment).collect()
    }
}
