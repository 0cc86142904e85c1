use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::source::errors::SourceError;
use crate::domain::source::models::NewSource;
use crate::domain::source::models::Source;
use crate::domain::source::models::SourceDescription;
use crate::domain::source::models::SourceId;
use crate::domain::source::models::SourceName;
use crate::domain::source::models::SourceUrl;
use crate::domain::source::models::UpdateSourceCommand;
use crate::domain::source::ports::SourceRepository;
use crate::domain::user::models::UserId;

pub struct PostgresSourceRepository {
    pool: PgPool,
}

impl PostgresSourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_source(row: PgRow) -> Result<Source, SourceError> {
        let read = |e: sqlx::Error| SourceError::DatabaseError(e.to_string());

        let description: Option<String> = row.try_get("description").map_err(read)?;

        Ok(Source {
            id: SourceId(row.try_get("id").map_err(read)?),
            name: SourceName::new(row.try_get("name").map_err(read)?)?,
            url: SourceUrl::new(row.try_get("url").map_err(read)?)?,
            description: description.map(SourceDescription::new).transpose()?,
            author_id: UserId(row.try_get("author_id").map_err(read)?),
            created_at: row.try_get("created_at").map_err(read)?,
        })
    }

    fn write_error(e: sqlx::Error, url: Option<&SourceUrl>) -> SourceError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("sources_url_key") {
                let url = url.map(SourceUrl::to_string).unwrap_or_default();
                return SourceError::UrlAlreadyExists(url);
            }
        }
        SourceError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl SourceRepository for PostgresSourceRepository {
    async fn create(&self, source: NewSource) -> Result<Source, SourceError> {
        let row = sqlx::query(
            r#"
            INSERT INTO sources (name, url, description, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, url, description, author_id, created_at
            "#,
        )
        .bind(source.name.as_str())
        .bind(source.url.as_str())
        .bind(source.description.as_ref().map(|d| d.as_str()))
        .bind(source.author_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, Some(&source.url)))?;

        Self::row_to_source(row)
    }

    async fn find_by_id(&self, id: SourceId) -> Result<Option<Source>, SourceError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, url, description, author_id, created_at
            FROM sources
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SourceError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_source).transpose()
    }

    async fn find_by_url(&self, url: &SourceUrl) -> Result<Option<Source>, SourceError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, url, description, author_id, created_at
            FROM sources
            WHERE url = $1
            "#,
        )
        .bind(url.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SourceError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_source).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Source>, SourceError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, url, description, author_id, created_at
            FROM sources
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SourceError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_source).collect()
    }

    async fn update(
        &self,
        id: SourceId,
        changes: UpdateSourceCommand,
    ) -> Result<Source, SourceError> {
        // NULL leaves name and url as stored; $4 says whether description was supplied.
        let row = sqlx::query(
            r#"
            UPDATE sources
            SET name = COALESCE($2, name),
                url = COALESCE($3, url),
                description = CASE WHEN $4 THEN $5 ELSE description END
            WHERE id = $1
            RETURNING id, name, url, description, author_id, created_at
            "#,
        )
        .bind(id.0)
        .bind(changes.name.as_ref().map(|n| n.as_str()))
        .bind(changes.url.as_ref().map(|u| u.as_str()))
        .bind(changes.description.is_some())
        .bind(
            changes
                .description
                .as_ref()
                .and_then(Option::as_ref)
                .map(|d| d.as_str()),
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::write_error(e, changes.url.as_ref()))?;

        row.map(Self::row_to_source)
            .transpose()?
            .ok_or(SourceError::NotFound(id))
    }

    async fn delete_with_articles(&self, id: SourceId) -> Result<u64, SourceError> {
        let database = |e: sqlx::Error| SourceError::DatabaseError(e.to_string());

        let mut tx = self.pool.begin().await.map_err(database)?;

        let articles = sqlx::query("DELETE FROM articles WHERE source_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(database)?;

        let source = sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(database)?;

        if source.rows_affected() == 0 {
            tx.rollback().await.map_err(database)?;
            return Err(SourceError::NotFound(id));
        }

        tx.commit().await.map_err(database)?;

        Ok(articles.rows_affected())
    }
}
