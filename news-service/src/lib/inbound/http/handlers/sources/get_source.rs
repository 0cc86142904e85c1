use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::SourceData;
use crate::domain::source::models::SourceId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_source(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<SourceData>, ApiError> {
    state
        .source_service
        .get_source(SourceId(id))
        .await
        .map_err(ApiError::from)
        .map(|ref source| ApiSuccess::new(StatusCode::OK, source.into()))
}
