use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleContent;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticleSummary;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::AuthorName;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::source::models::SourceId;
use crate::domain::user::models::UserId;

const ARTICLE_COLUMNS: &str =
    "id, title, summary, content, author_name, source_id, author_id, created_at";

pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_article(row: PgRow) -> Result<Article, ArticleError> {
        let read = |e: sqlx::Error| ArticleError::DatabaseError(e.to_string());

        let summary: Option<String> = row.try_get("summary").map_err(read)?;
        let author_name: Option<String> = row.try_get("author_name").map_err(read)?;

        Ok(Article {
            id: ArticleId(row.try_get("id").map_err(read)?),
            title: ArticleTitle::new(row.try_get("title").map_err(read)?)?,
            summary: summary.map(ArticleSummary::new).transpose()?,
            content: ArticleContent::new(row.try_get("content").map_err(read)?)?,
            author_name: author_name.map(AuthorName::new).transpose()?,
            source_id: SourceId(row.try_get("source_id").map_err(read)?),
            author_id: UserId(row.try_get("author_id").map_err(read)?),
            created_at: row.try_get("created_at").map_err(read)?,
        })
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO articles (title, summary, content, author_name, source_id, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(article.title.as_str())
        .bind(article.summary.as_ref().map(|s| s.as_str()))
        .bind(article.content.as_str())
        .bind(article.author_name.as_ref().map(|a| a.as_str()))
        .bind(article.source_id.0)
        .bind(article.author_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The source can disappear between the service's existence check and this insert.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ArticleError::SourceNotFound(article.source_id);
                }
            }
            ArticleError::DatabaseError(e.to_string())
        })?;

        Self::row_to_article(row)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleError> {
        let row = sqlx::query(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_article).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        let rows = sqlx::query(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_article).collect()
    }

    async fn find_by_source(&self, source_id: SourceId) -> Result<Vec<Article>, ArticleError> {
        let rows = sqlx::query(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE source_id = $1 ORDER BY id"
        ))
        .bind(source_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_article).collect()
    }

    async fn update(
        &self,
        id: ArticleId,
        changes: UpdateArticleCommand,
    ) -> Result<Article, ArticleError> {
        // NULL keeps title and content; $3 and $6 flag which nullable columns were supplied.
        let row = sqlx::query(&format!(
            r#"
            UPDATE articles
            SET title = COALESCE($2, title),
                summary = CASE WHEN $3 THEN $4 ELSE summary END,
                content = COALESCE($5, content),
                author_name = CASE WHEN $6 THEN $7 ELSE author_name END
            WHERE id = $1
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(id.0)
        .bind(changes.title.as_ref().map(|t| t.as_str()))
        .bind(changes.summary.is_some())
        .bind(changes.summary.as_ref().and_then(Option::as_ref).map(|s| s.as_str()))
        .bind(changes.content.as_ref().map(|c| c.as_str()))
        .bind(changes.author_name.is_some())
        .bind(
            changes
                .author_name
                .as_ref()
                .and_then(Option::as_ref)
                .map(|a| a.as_str()),
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_article)
            .transpose()?
            .ok_or(ArticleError::NotFound(id))
    }

    async fn delete(&self, id: ArticleId) -> Result<(), ArticleError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ArticleError::NotFound(id));
        }

        Ok(())
    }
}
