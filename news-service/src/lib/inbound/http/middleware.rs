use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Resolve the bearer token into a `Principal` and store it in request extensions.
///
/// Every failure (missing header, bad scheme, invalid token, unknown user)
/// produces the same 401 response.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)
        .map(str::to_owned)
        .ok_or_else(|| {
            tracing::debug!(uri = %req.uri(), "Missing or malformed Authorization header");
            ApiError::Unauthorized.into_response()
        })?;

    let principal = state
        .identity_resolver
        .resolve(&token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
