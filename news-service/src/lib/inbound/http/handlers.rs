use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::domain::access::errors::AccessError;
use crate::domain::article::errors::ArticleError;
use crate::domain::source::errors::SourceError;
use crate::domain::user::errors::UserError;
use crate::domain::validation::ValidationError;

pub mod articles;
pub mod auth;
pub mod sources;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized,
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(cause) => {
                tracing::error!(error = %cause, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let mut response =
            (status, Json(ApiResponseBody::new_error(status, message))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::InvalidCredentials => ApiError::Unauthorized,
            AccessError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            AccessError::Storage(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(e) => e.into(),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized,
            UserError::Hashing(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Validation(e) => e.into(),
            SourceError::Access(e) => e.into(),
            SourceError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SourceError::UrlAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            SourceError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::Validation(e) => e.into(),
            ArticleError::Access(e) => e.into(),
            ArticleError::NotFound(_) | ArticleError::SourceNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ArticleError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Body returned by delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedData {
    pub id: i64,
}

/// Deserializer for PATCH fields: absent stays `None` (via `#[serde(default)]`),
/// an explicit `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reject an explicit `null` for a field that cannot be cleared.
pub(crate) fn not_null<T>(
    field: &'static str,
    value: Option<Option<T>>,
) -> Result<Option<T>, ValidationError> {
    match value {
        Some(None) => Err(ValidationError::Empty { field }),
        other => Ok(other.flatten()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::source::models::SourceId;

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError::Unauthorized.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_domain_errors_map_to_status() {
        assert_eq!(
            ApiError::from(SourceError::Access(AccessError::Forbidden("no".to_string()))),
            ApiError::Forbidden("Forbidden: no".to_string())
        );
        assert!(matches!(
            ApiError::from(ArticleError::SourceNotFound(SourceId(3))),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::EmailAlreadyExists("a@x.com".to_string())),
            ApiError::Conflict(_)
        ));
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::Unauthorized
        );
        assert!(matches!(
            ApiError::from(SourceError::DatabaseError("boom".to_string())),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_not_null_rejects_explicit_null() {
        assert_eq!(not_null::<String>("name", None), Ok(None));
        assert_eq!(
            not_null("name", Some(Some("x".to_string()))),
            Ok(Some("x".to_string()))
        );
        assert_eq!(
            not_null::<String>("name", Some(None)),
            Err(ValidationError::Empty { field: "name" })
        );
    }
}
