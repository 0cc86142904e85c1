use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::models::Principal;
use crate::domain::access::policy::require_owner_or_admin;
use crate::domain::source::errors::SourceError;
use crate::domain::source::models::CreateSourceCommand;
use crate::domain::source::models::NewSource;
use crate::domain::source::models::Source;
use crate::domain::source::models::SourceId;
use crate::domain::source::models::UpdateSourceCommand;
use crate::domain::source::ports::SourceRepository;
use crate::domain::source::ports::SourceServicePort;

/// Concrete implementation of SourceServicePort.
///
/// Generic over repository for testability.
pub struct SourceService<SR>
where
    SR: SourceRepository,
{
    repository: Arc<SR>,
}

impl<SR> SourceService<SR>
where
    SR: SourceRepository,
{
    pub fn new(repository: Arc<SR>) -> Self {
        Self { repository }
    }

    /// Load a source and check that `principal` may modify it.
    async fn load_for_mutation(
        &self,
        id: SourceId,
        principal: &Principal,
    ) -> Result<Source, SourceError> {
        let source = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SourceError::NotFound(id))?;

        require_owner_or_admin(principal, source.author_id).map_err(|e| {
            tracing::warn!(
                source_id = %id,
                user_id = %principal.id,
                author_id = %source.author_id,
                "Source mutation denied"
            );
            e
        })?;

        Ok(source)
    }
}

#[async_trait]
impl<SR> SourceServicePort for SourceService<SR>
where
    SR: SourceRepository,
{
    async fn create_source(
        &self,
        command: CreateSourceCommand,
        principal: &Principal,
    ) -> Result<Source, SourceError> {
        if self.repository.find_by_url(&command.url).await?.is_some() {
            return Err(SourceError::UrlAlreadyExists(command.url.to_string()));
        }

        let source = self
            .repository
            .create(NewSource {
                name: command.name,
                url: command.url,
                description: command.description,
                author_id: principal.id,
            })
            .await?;

        tracing::info!(source_id = %source.id, author_id = %source.author_id, "Source created");
        Ok(source)
    }

    async fn get_source(&self, id: SourceId) -> Result<Source, SourceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SourceError::NotFound(id))
    }

    async fn list_sources(&self) -> Result<Vec<Source>, SourceError> {
        self.repository.list_all().await
    }

    async fn update_source(
        &self,
        id: SourceId,
        command: UpdateSourceCommand,
        principal: &Principal,
    ) -> Result<Source, SourceError> {
        self.load_for_mutation(id, principal).await?;

        if let Some(url) = &command.url {
            if let Some(holder) = self.repository.find_by_url(url).await? {
                if holder.id != id {
                    return Err(SourceError::UrlAlreadyExists(url.to_string()));
                }
            }
        }

        let updated = self.repository.update(id, command).await?;

        tracing::info!(source_id = %id, user_id = %principal.id, "Source updated");
        Ok(updated)
    }

    async fn delete_source(&self, id: SourceId, principal: &Principal) -> Result<(), SourceError> {
        self.load_for_mutation(id, principal).await?;

        let removed_articles = self.repository.delete_with_articles(id).await?;

        tracing::info!(
            source_id = %id,
            user_id = %principal.id,
            removed_articles,
            "Source deleted"
        );
        Ok(())
    }
}
