use async_trait::async_trait;

use crate::domain::access::models::Principal;
use crate::domain::source::errors::SourceError;
use crate::domain::source::models::CreateSourceCommand;
use crate::domain::source::models::NewSource;
use crate::domain::source::models::Source;
use crate::domain::source::models::SourceId;
use crate::domain::source::models::SourceUrl;
use crate::domain::source::models::UpdateSourceCommand;

/// Port for source domain service operations.
#[async_trait]
pub trait SourceServicePort: Send + Sync + 'static {
    /// Create a source owned by `principal`.
    ///
    /// # Errors
    /// * `UrlAlreadyExists` - Another source has the same url
    /// * `DatabaseError` - Database operation failed
    async fn create_source(
        &self,
        command: CreateSourceCommand,
        principal: &Principal,
    ) -> Result<Source, SourceError>;

    /// Retrieve source by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Source does not exist
    async fn get_source(&self, id: SourceId) -> Result<Source, SourceError>;

    /// List every source.
    async fn list_sources(&self) -> Result<Vec<Source>, SourceError>;

    /// Apply a partial update; allowed for the author or an administrator.
    ///
    /// # Errors
    /// * `NotFound` - Source does not exist (or vanished concurrently)
    /// * `Access(Forbidden)` - Principal is neither author nor admin
    /// * `UrlAlreadyExists` - New url belongs to another source
    async fn update_source(
        &self,
        id: SourceId,
        command: UpdateSourceCommand,
        principal: &Principal,
    ) -> Result<Source, SourceError>;

    /// Delete a source together with all of its articles.
    ///
    /// # Errors
    /// * `NotFound` - Source does not exist
    /// * `Access(Forbidden)` - Principal is neither author nor admin
    async fn delete_source(&self, id: SourceId, principal: &Principal) -> Result<(), SourceError>;
}

/// Persistence operations for source aggregate.
#[async_trait]
pub trait SourceRepository: Send + Sync + 'static {
    /// Persist new source.
    ///
    /// # Errors
    /// * `UrlAlreadyExists` - Unique url constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, source: NewSource) -> Result<Source, SourceError>;

    async fn find_by_id(&self, id: SourceId) -> Result<Option<Source>, SourceError>;

    async fn find_by_url(&self, url: &SourceUrl) -> Result<Option<Source>, SourceError>;

    async fn list_all(&self) -> Result<Vec<Source>, SourceError>;

    /// Write only the fields `changes` supplies and return the stored source.
    ///
    /// # Errors
    /// * `NotFound` - Source does not exist
    /// * `UrlAlreadyExists` - Unique url constraint violated
    async fn update(
        &self,
        id: SourceId,
        changes: UpdateSourceCommand,
    ) -> Result<Source, SourceError>;

    /// Delete the source's articles and then the source, atomically.
    ///
    /// # Returns
    /// Number of articles removed
    ///
    /// # Errors
    /// * `NotFound` - Source does not exist
    async fn delete_with_articles(&self, id: SourceId) -> Result<u64, SourceError>;
}
