use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use sqlx::SqlitePool;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticlePage;
use crate::domain::article::models::ArticleQuery;
use crate::domain::article::models::ArticleWithAuthor;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::user::models::UserId;

pub struct SqliteArticleRepository {
    pool: SqlitePool,
}

/// Turn a raw search term into a LIKE pattern that matches the term as a
/// literal substring. `%`, `_`, and the escape character itself are escaped,
/// so a query like `50%` does not act as a wildcard.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Page count for a listing: ceil(total_count / page_size), zero when the
/// listing is empty.
fn total_pages(total_count: i64, page_size: u32) -> u32 {
    let page_size = page_size as i64;
    ((total_count + page_size - 1) / page_size) as u32
}

impl SqliteArticleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_article(row: &SqliteRow) -> Result<ArticleWithAuthor, ArticleError> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let created_at: DateTime<Utc> = row.get("created_at");

        let article = Article {
            id: ArticleId::from_string(&id)
                .map_err(|e| ArticleError::DatabaseError(e.to_string()))?,
            title: row.get("title"),
            author: row.get("author"),
            abstract_text: row.get("abstract"),
            keywords: row.get("keywords"),
            content: row.get("content"),
            bibliography: row.get("bibliography"),
            user_id: UserId::from_string(&user_id)
                .map_err(|e| ArticleError::DatabaseError(e.to_string()))?,
            created_at,
        };

        Ok(ArticleWithAuthor {
            article,
            author_name: row.get("author_name"),
        })
    }

    async fn list_all(&self, query: &ArticleQuery) -> Result<ArticlePage, ArticleError> {
        let total_count: i64 = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM articles
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
        .get("total");

        let rows = sqlx::query(
            r#"
            SELECT a.id, a.title, a.author, a.abstract, a.keywords, a.content,
                   a.bibliography, a.user_id, a.created_at, u.fullname AS author_name
            FROM articles a
            JOIN users u ON u.id = a.user_id
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(query.page_size as i64)
        .bind(page_offset(query))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        Self::assemble_page(rows, total_count, query)
    }

    async fn list_filtered(
        &self,
        term: &str,
        query: &ArticleQuery,
    ) -> Result<ArticlePage, ArticleError> {
        let pattern = like_pattern(term);

        let total_count: i64 = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM articles
            WHERE title LIKE ?1 ESCAPE '\'
               OR abstract LIKE ?1 ESCAPE '\'
               OR keywords LIKE ?1 ESCAPE '\'
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
        .get("total");

        let rows = sqlx::query(
            r#"
            SELECT a.id, a.title, a.author, a.abstract, a.keywords, a.content,
                   a.bibliography, a.user_id, a.created_at, u.fullname AS author_name
            FROM articles a
            JOIN users u ON u.id = a.user_id
            WHERE a.title LIKE ?1 ESCAPE '\'
               OR a.abstract LIKE ?1 ESCAPE '\'
               OR a.keywords LIKE ?1 ESCAPE '\'
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(&pattern)
        .bind(query.page_size as i64)
        .bind(page_offset(query))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        Self::assemble_page(rows, total_count, query)
    }

    fn assemble_page(
        rows: Vec<SqliteRow>,
        total_count: i64,
        query: &ArticleQuery,
    ) -> Result<ArticlePage, ArticleError> {
        let items = rows
            .iter()
            .map(Self::row_to_article)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ArticlePage {
            items,
            total_count,
            page: query.page,
            total_pages: total_pages(total_count, query.page_size),
        })
    }
}

/// Rows to skip for a 1-based page number.
fn page_offset(query: &ArticleQuery) -> i64 {
    (query.page as i64 - 1) * query.page_size as i64
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    async fn create(&self, article: Article) -> Result<Article, ArticleError> {
        sqlx::query(
            r#"
            INSERT INTO articles (id, title, author, abstract, keywords, content,
                                  bibliography, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(article.id.to_string())
        .bind(&article.title)
        .bind(&article.author)
        .bind(&article.abstract_text)
        .bind(&article.keywords)
        .bind(&article.content)
        .bind(article.bibliography.as_deref())
        .bind(article.user_id.to_string())
        .bind(article.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Articles reference exactly one other table, so a foreign key
            // failure here means the owning user row is gone.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ArticleError::AuthorNotFound(article.user_id);
                }
            }
            ArticleError::DatabaseError(e.to_string())
        })?;

        Ok(article)
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<ArticleWithAuthor>, ArticleError> {
        let row = sqlx::query(
            r#"
            SELECT a.id, a.title, a.author, a.abstract, a.keywords, a.content,
                   a.bibliography, a.user_id, a.created_at, u.fullname AS author_name
            FROM articles a
            JOIN users u ON u.id = a.user_id
            WHERE a.id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_article(&r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, query: &ArticleQuery) -> Result<ArticlePage, ArticleError> {
        match &query.search {
            Some(term) => self.list_filtered(term, query).await,
            None => self.list_all(query).await,
        }
    }
}
