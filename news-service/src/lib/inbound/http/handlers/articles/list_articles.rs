use axum::extract::State;
use axum::http::StatusCode;

use super::ArticleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ArticleData>>, ApiError> {
    let articles = state.article_service.list_articles().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        articles.iter().map(ArticleData::from).collect(),
    ))
}
