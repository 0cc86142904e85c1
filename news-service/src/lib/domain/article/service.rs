use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::models::Principal;
use crate::domain::access::policy::require_owner_or_admin;
use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::source::models::SourceId;
use crate::domain::source::ports::SourceRepository;

/// Concrete implementation of ArticleServicePort.
///
/// Holds the source repository as well, to check the parent source before inserting.
pub struct ArticleService<AR, SR>
where
    AR: ArticleRepository,
    SR: SourceRepository,
{
    articles: Arc<AR>,
    sources: Arc<SR>,
}

impl<AR, SR> ArticleService<AR, SR>
where
    AR: ArticleRepository,
    SR: SourceRepository,
{
    pub fn new(articles: Arc<AR>, sources: Arc<SR>) -> Self {
        Self { articles, sources }
    }

    async fn ensure_source_exists(&self, source_id: SourceId) -> Result<(), ArticleError> {
        let source = self
            .sources
            .find_by_id(source_id)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        match source {
            Some(_) => Ok(()),
            None => Err(ArticleError::SourceNotFound(source_id)),
        }
    }

    async fn load_for_mutation(
        &self,
        id: ArticleId,
        principal: &Principal,
    ) -> Result<Article, ArticleError> {
        let article = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(id))?;

        require_owner_or_admin(principal, article.author_id).map_err(|e| {
            tracing::warn!(
                article_id = %id,
                user_id = %principal.id,
                author_id = %article.author_id,
                "Article mutation denied"
            );
            e
        })?;

        Ok(article)
    }
}

#[async_trait]
impl<AR, SR> ArticleServicePort for ArticleService<AR, SR>
where
    AR: ArticleRepository,
    SR: SourceRepository,
{
    async fn create_article(
        &self,
        command: CreateArticleCommand,
        principal: &Principal,
    ) -> Result<Article, ArticleError> {
        self.ensure_source_exists(command.source_id).await?;

        let article = self
            .articles
            .create(NewArticle {
                title: command.title,
                summary: command.summary,
                content: command.content,
                author_name: command.author_name,
                source_id: command.source_id,
                author_id: principal.id,
            })
            .await?;

        tracing::info!(
            article_id = %article.id,
            source_id = %article.source_id,
            author_id = %article.author_id,
            "Article created"
        );
        Ok(article)
    }

    async fn get_article(&self, id: ArticleId) -> Result<Article, ArticleError> {
        self.articles
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(id))
    }

    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError> {
        self.articles.list_all().await
    }

    async fn list_articles_by_source(
        &self,
        source_id: SourceId,
    ) -> Result<Vec<Article>, ArticleError> {
        self.ensure_source_exists(source_id).await?;
        self.articles.find_by_source(source_id).await
    }

    async fn update_article(
        &self,
        id: ArticleId,
        command: UpdateArticleCommand,
        principal: &Principal,
    ) -> Result<Article, ArticleError> {
        self.load_for_mutation(id, principal).await?;

        let updated = self.articles.update(id, command).await?;

        tracing::info!(article_id = %id, user_id = %principal.id, "Article updated");
        Ok(updated)
    }

    async fn delete_article(
        &self,
        id: ArticleId,
        principal: &Principal,
    ) -> Result<(), ArticleError> {
        self.load_for_mutation(id, principal).await?;
        self.articles.delete(id).await?;

        tracing::info!(article_id = %id, user_id = %principal.id, "Article deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::access::errors::AccessError;
    use crate::domain::access::models::Role;
    use crate::domain::article::models::ArticleContent;
    use crate::domain::article::models::ArticleTitle;
    use crate::domain::article::models::AuthorName;
    use crate::domain::source::errors::SourceError;
    use crate::domain::source::models::NewSource;
    use crate::domain::source::models::Source;
    use crate::domain::source::models::SourceName;
    use crate::domain::source::models::SourceUrl;
    use crate::domain::source::models::UpdateSourceCommand;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestArticleRepository {}

        #[async_trait]
        impl ArticleRepository for TestArticleRepository {
            async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;
            async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleError>;
            async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;
            async fn find_by_source(&self, source_id: SourceId) -> Result<Vec<Article>, ArticleError>;
            async fn update(
                &self,
                id: ArticleId,
                changes: UpdateArticleCommand,
            ) -> Result<Article, ArticleError>;
            async fn delete(&self, id: ArticleId) -> Result<(), ArticleError>;
        }
    }

    mock! {
        pub TestSourceRepository {}

        #[async_trait]
        impl SourceRepository for TestSourceRepository {
            async fn create(&self, source: NewSource) -> Result<Source, SourceError>;
            async fn find_by_id(&self, id: SourceId) -> Result<Option<Source>, SourceError>;
            async fn find_by_url(&self, url: &SourceUrl) -> Result<Option<Source>, SourceError>;
            async fn list_all(&self) -> Result<Vec<Source>, SourceError>;
            async fn update(
                &self,
                id: SourceId,
                changes: UpdateSourceCommand,
            ) -> Result<Source, SourceError>;
            async fn delete_with_articles(&self, id: SourceId) -> Result<u64, SourceError>;
        }
    }

    fn source(id: i64) -> Source {
        Source {
            id: SourceId(id),
            name: SourceName::new("Daily Planet".to_string()).unwrap(),
            url: SourceUrl::new("https://planet.example.com".to_string()).unwrap(),
            description: None,
            author_id: UserId(1),
            created_at: Utc::now(),
        }
    }

    fn article(id: i64, author_id: i64) -> Article {
        Article {
            id: ArticleId(id),
            title: ArticleTitle::new("Launch day".to_string()).unwrap(),
            summary: None,
            content: ArticleContent::new("The rocket flew.".to_string()).unwrap(),
            author_name: None,
            source_id: SourceId(1),
            author_id: UserId(author_id),
            created_at: Utc::now(),
        }
    }

    fn create_command(source_id: i64) -> CreateArticleCommand {
        CreateArticleCommand {
            title: ArticleTitle::new("Launch day".to_string()).unwrap(),
            summary: None,
            content: ArticleContent::new("The rocket flew.".to_string()).unwrap(),
            author_name: Some(AuthorName::new("Lois Lane".to_string()).unwrap()),
            source_id: SourceId(source_id),
        }
    }

    fn user(id: i64) -> Principal {
        Principal::new(UserId(id), Role::User)
    }

    #[tokio::test]
    async fn test_create_article_under_existing_source() {
        let mut articles = MockTestArticleRepository::new();
        let mut sources = MockTestSourceRepository::new();

        sources
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(source(id.0))));
        articles
            .expect_create()
            .withf(|new| new.author_id == UserId(3) && new.source_id == SourceId(1))
            .times(1)
            .returning(|new| {
                Ok(Article {
                    id: ArticleId(10),
                    title: new.title,
                    summary: new.summary,
                    content: new.content,
                    author_name: new.author_name,
                    source_id: new.source_id,
                    author_id: new.author_id,
                    created_at: Utc::now(),
                })
            });

        let service = ArticleService::new(Arc::new(articles), Arc::new(sources));

        let created = service
            .create_article(create_command(1), &user(3))
            .await
            .unwrap();
        assert_eq!(created.id, ArticleId(10));
        assert_eq!(created.author_id, UserId(3));
        assert_eq!(created.author_name.unwrap().as_str(), "Lois Lane");
    }

    #[tokio::test]
    async fn test_create_article_missing_source_inserts_nothing() {
        let mut articles = MockTestArticleRepository::new();
        let mut sources = MockTestSourceRepository::new();

        sources
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        articles.expect_create().times(0);

        let service = ArticleService::new(Arc::new(articles), Arc::new(sources));

        let result = service.create_article(create_command(99), &user(3)).await;
        assert!(matches!(
            result,
            Err(ArticleError::SourceNotFound(SourceId(99)))
        ));
    }

    #[tokio::test]
    async fn test_list_articles_by_missing_source() {
        let mut articles = MockTestArticleRepository::new();
        let mut sources = MockTestSourceRepository::new();

        sources
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        articles.expect_find_by_source().times(0);

        let service = ArticleService::new(Arc::new(articles), Arc::new(sources));

        assert!(matches!(
            service.list_articles_by_source(SourceId(4)).await,
            Err(ArticleError::SourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_article_by_owner() {
        let mut articles = MockTestArticleRepository::new();
        let sources = MockTestSourceRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(article(id.0, 3))));
        articles
            .expect_update()
            .withf(|id, changes| {
                *id == ArticleId(2)
                    && changes.title.as_ref().map(ArticleTitle::as_str) == Some("Recap")
                    && changes.content.is_none()
            })
            .times(1)
            .returning(|id, changes| {
                let mut stored = article(id.0, 3);
                changes.apply_to(&mut stored);
                Ok(stored)
            });

        let service = ArticleService::new(Arc::new(articles), Arc::new(sources));

        let command = UpdateArticleCommand {
            title: Some(ArticleTitle::new("Recap".to_string()).unwrap()),
            ..Default::default()
        };

        let updated = service
            .update_article(ArticleId(2), command, &user(3))
            .await
            .unwrap();
        assert_eq!(updated.title.as_str(), "Recap");
        assert_eq!(updated.content.as_str(), "The rocket flew.");
    }

    #[tokio::test]
    async fn test_update_article_by_non_owner_is_forbidden() {
        let mut articles = MockTestArticleRepository::new();
        let sources = MockTestSourceRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(article(id.0, 3))));
        articles.expect_update().times(0);

        let service = ArticleService::new(Arc::new(articles), Arc::new(sources));

        let result = service
            .update_article(ArticleId(2), UpdateArticleCommand::default(), &user(4))
            .await;
        assert!(matches!(
            result,
            Err(ArticleError::Access(AccessError::Forbidden(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete_article_by_admin() {
        let mut articles = MockTestArticleRepository::new();
        let sources = MockTestSourceRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(article(id.0, 3))));
        articles
            .expect_delete()
            .withf(|id| *id == ArticleId(2))
            .times(1)
            .returning(|_| Ok(()));

        let service = ArticleService::new(Arc::new(articles), Arc::new(sources));

        let admin = Principal::new(UserId(1), Role::Admin);
        assert!(service.delete_article(ArticleId(2), &admin).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_article_not_found() {
        let mut articles = MockTestArticleRepository::new();
        let sources = MockTestSourceRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        articles.expect_delete().times(0);

        let service = ArticleService::new(Arc::new(articles), Arc::new(sources));

        assert!(matches!(
            service.delete_article(ArticleId(2), &user(3)).await,
            Err(ArticleError::NotFound(ArticleId(2)))
        ));
    }
}
