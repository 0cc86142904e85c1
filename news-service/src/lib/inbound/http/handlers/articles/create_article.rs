use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ArticleData;
use crate::domain::access::models::Principal;
use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleContent;
use crate::domain::article::models::ArticleSummary;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::AuthorName;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::source::models::SourceId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub author_name: Option<String>,
    pub source_id: i64,
}

impl CreateArticleRequest {
    fn try_into_command(self) -> Result<CreateArticleCommand, ArticleError> {
        Ok(CreateArticleCommand {
            title: ArticleTitle::new(self.title)?,
            summary: self.summary.map(ArticleSummary::new).transpose()?,
            content: ArticleContent::new(self.content)?,
            author_name: self.author_name.map(AuthorName::new).transpose()?,
            source_id: SourceId(self.source_id),
        })
    }
}

pub async fn create_article(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateArticleRequest>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .article_service
        .create_article(command, &principal)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::CREATED, article.into()))
}
