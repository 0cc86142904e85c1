use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ArticleData;
use crate::domain::access::models::Principal;
use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleContent;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticleSummary;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::AuthorName;
use crate::domain::article::models::UpdateArticleCommand;
use crate::inbound::http::handlers::not_null;
use crate::inbound::http::handlers::nullable;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an article. `source_id` is not accepted.
///
/// An explicit `null` clears `summary` or `author_name` and is rejected for the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateArticleRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub author_name: Option<Option<String>>,
}

impl UpdateArticleRequest {
    fn try_into_command(self) -> Result<UpdateArticleCommand, ArticleError> {
        Ok(UpdateArticleCommand {
            title: not_null("title", self.title)?
                .map(ArticleTitle::new)
                .transpose()?,
            summary: self
                .summary
                .map(|s| s.map(ArticleSummary::new).transpose())
                .transpose()?,
            content: not_null("content", self.content)?
                .map(ArticleContent::new)
                .transpose()?,
            author_name: self
                .author_name
                .map(|a| a.map(AuthorName::new).transpose())
                .transpose()?,
        })
    }
}

pub async fn update_article(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .article_service
        .update_article(ArticleId(id), command, &principal)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::OK, article.into()))
}
