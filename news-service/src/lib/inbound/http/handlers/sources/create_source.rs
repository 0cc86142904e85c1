use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::SourceData;
use crate::domain::access::models::Principal;
use crate::domain::source::errors::SourceError;
use crate::domain::source::models::CreateSourceCommand;
use crate::domain::source::models::SourceDescription;
use crate::domain::source::models::SourceName;
use crate::domain::source::models::SourceUrl;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSourceRequest {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
}

impl CreateSourceRequest {
    fn try_into_command(self) -> Result<CreateSourceCommand, SourceError> {
        Ok(CreateSourceCommand {
            name: SourceName::new(self.name)?,
            url: SourceUrl::new(self.url)?,
            description: self.description.map(SourceDescription::new).transpose()?,
        })
    }
}

pub async fn create_source(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreateSourceRequest>,
) -> Result<ApiSuccess<SourceData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .source_service
        .create_source(command, &principal)
        .await
        .map_err(ApiError::from)
        .map(|ref source| ApiSuccess::new(StatusCode::CREATED, source.into()))
}
