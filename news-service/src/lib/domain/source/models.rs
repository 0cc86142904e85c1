use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::domain::validation::bounded;
use crate::domain::validation::ValidationError;

/// News source aggregate, owned by the user who created it.
#[derive(Debug, Clone)]
pub struct Source {
    pub id: SourceId,
    pub name: SourceName,
    pub url: SourceUrl,
    pub description: Option<SourceDescription>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Source unique identifier, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub i64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a source (1-255 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName(String);

impl SourceName {
    const MAX_LENGTH: usize = 255;

    pub fn new(name: String) -> Result<Self, ValidationError> {
        bounded("name", name, 1, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Address of a source (1-1024 characters, unique across sources).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(String);

impl SourceUrl {
    const MAX_LENGTH: usize = 1024;

    pub fn new(url: String) -> Result<Self, ValidationError> {
        bounded("url", url, 1, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-text description (up to 1000 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescription(String);

impl SourceDescription {
    const MAX_LENGTH: usize = 1000;

    pub fn new(description: String) -> Result<Self, ValidationError> {
        bounded("description", description, 0, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Source row to insert; storage assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewSource {
    pub name: SourceName,
    pub url: SourceUrl,
    pub description: Option<SourceDescription>,
    pub author_id: UserId,
}

/// Command to create a source.
#[derive(Debug)]
pub struct CreateSourceCommand {
    pub name: SourceName,
    pub url: SourceUrl,
    pub description: Option<SourceDescription>,
}

/// Command to update an existing source with optional validated fields.
///
/// Only provided fields will be updated. `description: Some(None)` clears
/// the stored description.
#[derive(Debug, Default)]
pub struct UpdateSourceCommand {
    pub name: Option<SourceName>,
    pub url: Option<SourceUrl>,
    pub description: Option<Option<SourceDescription>>,
}

impl UpdateSourceCommand {
    /// Apply the supplied fields onto `source`, leaving the rest untouched.
    pub fn apply_to(self, source: &mut Source) {
        if let Some(name) = self.name {
            source.name = name;
        }
        if let Some(url) = self.url {
            source.url = url;
        }
        if let Some(description) = self.description {
            source.description = description;
        }
    }
}
