use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ArticleData;
use crate::domain::article::models::ArticleId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    state
        .article_service
        .get_article(ArticleId(id))
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::OK, article.into()))
}
