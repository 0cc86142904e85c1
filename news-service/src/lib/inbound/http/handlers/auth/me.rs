use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::UserData;
use crate::domain::access::models::Principal;
use crate::domain::user::errors::UserError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    // The resolver already loaded this user; a miss here means it was deleted mid-request.
    let user = state
        .user_service
        .get_user(principal.id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => ApiError::Unauthorized,
            other => ApiError::from(other),
        })?;

    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}
