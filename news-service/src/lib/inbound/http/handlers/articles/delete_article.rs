use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::access::models::Principal;
use crate::domain::article::models::ArticleId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::DeletedData;
use crate::inbound::http::router::AppState;

pub async fn delete_article(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<DeletedData>, ApiError> {
    state
        .article_service
        .delete_article(ArticleId(id), &principal)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, DeletedData { id }))
}
