use async_trait::async_trait;

use crate::domain::access::models::Principal;
use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::source::models::SourceId;

/// Port for article domain service operations.
#[async_trait]
pub trait ArticleServicePort: Send + Sync + 'static {
    /// Publish an article owned by `principal` under an existing source.
    ///
    /// # Errors
    /// * `SourceNotFound` - Referenced source does not exist; nothing is inserted
    /// * `DatabaseError` - Database operation failed
    async fn create_article(
        &self,
        command: CreateArticleCommand,
        principal: &Principal,
    ) -> Result<Article, ArticleError>;

    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn get_article(&self, id: ArticleId) -> Result<Article, ArticleError>;

    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError>;

    /// List the articles published under one source.
    ///
    /// # Errors
    /// * `SourceNotFound` - Source does not exist
    async fn list_articles_by_source(
        &self,
        source_id: SourceId,
    ) -> Result<Vec<Article>, ArticleError>;

    /// Apply a partial update; allowed for the author or an administrator.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist (or vanished concurrently)
    /// * `Access(Forbidden)` - Principal is neither author nor admin
    async fn update_article(
        &self,
        id: ArticleId,
        command: UpdateArticleCommand,
        principal: &Principal,
    ) -> Result<Article, ArticleError>;

    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `Access(Forbidden)` - Principal is neither author nor admin
    async fn delete_article(&self, id: ArticleId, principal: &Principal)
        -> Result<(), ArticleError>;
}

/// Persistence operations for article aggregate.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// Persist new article.
    ///
    /// # Errors
    /// * `SourceNotFound` - Source was removed between the existence check and the insert
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleError>;

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;

    async fn find_by_source(&self, source_id: SourceId) -> Result<Vec<Article>, ArticleError>;

    /// Write only the fields `changes` supplies and return the stored article.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn update(
        &self,
        id: ArticleId,
        changes: UpdateArticleCommand,
    ) -> Result<Article, ArticleError>;

    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn delete(&self, id: ArticleId) -> Result<(), ArticleError>;
}
