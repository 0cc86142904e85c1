use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::source::models::SourceId;
use crate::inbound::http::handlers::articles::ArticleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_source_articles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<Vec<ArticleData>>, ApiError> {
    let articles = state
        .article_service
        .list_articles_by_source(SourceId(id))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        articles.iter().map(ArticleData::from).collect(),
    ))
}
