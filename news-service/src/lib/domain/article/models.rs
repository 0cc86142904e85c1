use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::source::models::SourceId;
use crate::domain::user::models::UserId;
use crate::domain::validation::bounded;
use crate::domain::validation::ValidationError;

/// Article aggregate. Belongs to exactly one source and is owned by its author.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub summary: Option<ArticleSummary>,
    pub content: ArticleContent,
    pub author_name: Option<AuthorName>,
    pub source_id: SourceId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(pub i64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Headline (1-1024 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    const MAX_LENGTH: usize = 1024;

    pub fn new(title: String) -> Result<Self, ValidationError> {
        bounded("title", title, 1, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Short abstract (up to 5000 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary(String);

impl ArticleSummary {
    const MAX_LENGTH: usize = 5000;

    pub fn new(summary: String) -> Result<Self, ValidationError> {
        bounded("summary", summary, 0, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Article body. Unbounded, but never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent(String);

impl ArticleContent {
    pub fn new(content: String) -> Result<Self, ValidationError> {
        bounded("content", content, 1, usize::MAX).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Byline as printed by the source (up to 255 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    const MAX_LENGTH: usize = 255;

    pub fn new(name: String) -> Result<Self, ValidationError> {
        bounded("author_name", name, 0, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Article row to insert; storage assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub summary: Option<ArticleSummary>,
    pub content: ArticleContent,
    pub author_name: Option<AuthorName>,
    pub source_id: SourceId,
    pub author_id: UserId,
}

/// Command to publish an article under an existing source.
#[derive(Debug)]
pub struct CreateArticleCommand {
    pub title: ArticleTitle,
    pub summary: Option<ArticleSummary>,
    pub content: ArticleContent,
    pub author_name: Option<AuthorName>,
    pub source_id: SourceId,
}

/// Partial article update. The owning source cannot be changed.
///
/// `Some(None)` on a nullable field clears it.
#[derive(Debug, Default)]
pub struct UpdateArticleCommand {
    pub title: Option<ArticleTitle>,
    pub summary: Option<Option<ArticleSummary>>,
    pub content: Option<ArticleContent>,
    pub author_name: Option<Option<AuthorName>>,
}

impl UpdateArticleCommand {
    pub fn apply_to(self, article: &mut Article) {
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(summary) = self.summary {
            article.summary = summary;
        }
        if let Some(content) = self.content {
            article.content = content;
        }
        if let Some(author_name) = self.author_name {
            article.author_name = author_name;
        }
    }
}
