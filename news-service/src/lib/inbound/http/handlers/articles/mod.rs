use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::article::models::Article;

pub mod create_article;
pub mod delete_article;
pub mod get_article;
pub mod list_articles;
pub mod update_article;

pub use create_article::create_article;
pub use delete_article::delete_article;
pub use get_article::get_article;
pub use list_articles::list_articles;
pub use update_article::update_article;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleData {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author_name: Option<String>,
    pub source_id: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Article> for ArticleData {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.0,
            title: article.title.as_str().to_string(),
            summary: article.summary.as_ref().map(|s| s.as_str().to_string()),
            content: article.content.as_str().to_string(),
            author_name: article
                .author_name
                .as_ref()
                .map(|a| a.as_str().to_string()),
            source_id: article.source_id.0,
            author_id: article.author_id.0,
            created_at: article.created_at,
        }
    }
}
