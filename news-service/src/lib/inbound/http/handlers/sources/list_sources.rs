use axum::extract::State;
use axum::http::StatusCode;

use super::SourceData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_sources(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<SourceData>>, ApiError> {
    let sources = state.source_service.list_sources().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        sources.iter().map(SourceData::from).collect(),
    ))
}
