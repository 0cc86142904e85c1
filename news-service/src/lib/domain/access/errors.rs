use thiserror::Error;

/// Authentication and authorization failures.
///
/// `InvalidCredentials` covers every token or login problem: malformed,
/// expired, bad signature, unknown user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
