use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::SourceData;
use crate::domain::access::models::Principal;
use crate::domain::source::errors::SourceError;
use crate::domain::source::models::SourceDescription;
use crate::domain::source::models::SourceId;
use crate::domain::source::models::SourceName;
use crate::domain::source::models::SourceUrl;
use crate::domain::source::models::UpdateSourceCommand;
use crate::inbound::http::handlers::not_null;
use crate::inbound::http::handlers::nullable;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a source (raw JSON)
///
/// Each field distinguishes absent (`None`) from explicit `null` (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateSourceRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl UpdateSourceRequest {
    fn try_into_command(self) -> Result<UpdateSourceCommand, SourceError> {
        Ok(UpdateSourceCommand {
            name: not_null("name", self.name)?
                .map(SourceName::new)
                .transpose()?,
            url: not_null("url", self.url)?.map(SourceUrl::new).transpose()?,
            description: self
                .description
                .map(|d| d.map(SourceDescription::new).transpose())
                .transpose()?,
        })
    }
}

pub async fn update_source(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSourceRequest>,
) -> Result<ApiSuccess<SourceData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .source_service
        .update_source(SourceId(id), command, &principal)
        .await
        .map_err(ApiError::from)
        .map(|ref source| ApiSuccess::new(StatusCode::OK, source.into()))
}
