//! In-memory implementation of the user, source and article repositories.
//!
//! All three tables live behind one `tokio::sync::RwLock`, so a source delete and the removal
//! of its articles happen under a single write lock. State is lost on restart; this backend
//! exists for local development and router tests.
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::source::errors::SourceError;
use crate::domain::source::models::NewSource;
use crate::domain::source::models::Source;
use crate::domain::source::models::SourceId;
use crate::domain::source::models::SourceUrl;
use crate::domain::source::models::UpdateSourceCommand;
use crate::domain::source::ports::SourceRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

#[derive(Default)]
struct Tables {
    next_user_id: i64,
    next_source_id: i64,
    next_article_id: i64,
    users: BTreeMap<UserId, User>,
    sources: BTreeMap<SourceId, Source>,
    articles: BTreeMap<ArticleId, Article>,
}

/// Mirrors the uniqueness and foreign key constraints of the Postgres schema.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        tables.next_user_id += 1;
        let created = User {
            id: UserId(tables.next_user_id),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| &u.email == email).cloned())
    }
}

#[async_trait]
impl SourceRepository for InMemoryRepository {
    async fn create(&self, source: NewSource) -> Result<Source, SourceError> {
        let mut tables = self.tables.write().await;

        if tables.sources.values().any(|s| s.url == source.url) {
            return Err(SourceError::UrlAlreadyExists(source.url.to_string()));
        }

        tables.next_source_id += 1;
        let created = Source {
            id: SourceId(tables.next_source_id),
            name: source.name,
            url: source.url,
            description: source.description,
            author_id: source.author_id,
            created_at: Utc::now(),
        };
        tables.sources.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: SourceId) -> Result<Option<Source>, SourceError> {
        Ok(self.tables.read().await.sources.get(&id).cloned())
    }

    async fn find_by_url(&self, url: &SourceUrl) -> Result<Option<Source>, SourceError> {
        let tables = self.tables.read().await;
        Ok(tables.sources.values().find(|s| &s.url == url).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Source>, SourceError> {
        Ok(self.tables.read().await.sources.values().cloned().collect())
    }

    async fn update(
        &self,
        id: SourceId,
        changes: UpdateSourceCommand,
    ) -> Result<Source, SourceError> {
        let mut tables = self.tables.write().await;

        if let Some(url) = &changes.url {
            if tables.sources.values().any(|s| s.id != id && &s.url == url) {
                return Err(SourceError::UrlAlreadyExists(url.to_string()));
            }
        }

        let stored = tables
            .sources
            .get_mut(&id)
            .ok_or(SourceError::NotFound(id))?;
        changes.apply_to(stored);

        Ok(stored.clone())
    }

    async fn delete_with_articles(&self, id: SourceId) -> Result<u64, SourceError> {
        let mut tables = self.tables.write().await;

        if tables.sources.remove(&id).is_none() {
            return Err(SourceError::NotFound(id));
        }

        let before = tables.articles.len();
        tables.articles.retain(|_, article| article.source_id != id);

        Ok((before - tables.articles.len()) as u64)
    }
}

#[async_trait]
impl ArticleRepository for InMemoryRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let mut tables = self.tables.write().await;

        if !tables.sources.contains_key(&article.source_id) {
            return Err(ArticleError::SourceNotFound(article.source_id));
        }

        tables.next_article_id += 1;
        let created = Article {
            id: ArticleId(tables.next_article_id),
            title: article.title,
            summary: article.summary,
            content: article.content,
            author_name: article.author_name,
            source_id: article.source_id,
            author_id: article.author_id,
            created_at: Utc::now(),
        };
        tables.articles.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleError> {
        Ok(self.tables.read().await.articles.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        Ok(self.tables.read().await.articles.values().cloned().collect())
    }

    async fn find_by_source(&self, source_id: SourceId) -> Result<Vec<Article>, ArticleError> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .values()
            .filter(|a| a.source_id == source_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: ArticleId,
        changes: UpdateArticleCommand,
    ) -> Result<Article, ArticleError> {
        let mut tables = self.tables.write().await;

        let stored = tables
            .articles
            .get_mut(&id)
            .ok_or(ArticleError::NotFound(id))?;
        changes.apply_to(stored);

        Ok(stored.clone())
    }

    async fn delete(&self, id: ArticleId) -> Result<(), ArticleError> {
        match self.tables.write().await.articles.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ArticleError::NotFound(id)),
        }
    }
}
