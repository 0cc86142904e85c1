use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::source::models::Source;

pub mod create_source;
pub mod delete_source;
pub mod get_source;
pub mod list_source_articles;
pub mod list_sources;
pub mod update_source;

pub use create_source::create_source;
pub use delete_source::delete_source;
pub use get_source::get_source;
pub use list_source_articles::list_source_articles;
pub use list_sources::list_sources;
pub use update_source::update_source;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceData {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Source> for SourceData {
    fn from(source: &Source) -> Self {
        Self {
            id: source.id.0,
            name: source.name.as_str().to_string(),
            url: source.url.as_str().to_string(),
            description: source.description.as_ref().map(|d| d.as_str().to_string()),
            author_id: source.author_id.0,
            created_at: source.created_at,
        }
    }
}
