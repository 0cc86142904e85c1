use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT issuance.
///
/// Holds the process-wide signing configuration (secret, algorithm, ttl),
/// which is read-only after construction and safe to share across tasks.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,

    /// Expiry of the access token (Unix timestamp)
    pub expires_at: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_handler` - Configured token codec
    /// * `token_ttl` - Lifetime of every issued access token
    pub fn new(jwt_handler: JwtHandler, token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject the token is issued to
    /// * `role` - Role to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = Claims::for_user(user_id, role, self.token_ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: claims.exp,
        })
    }

    /// Issue a JWT token without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, user_id: i64, role: &str) -> Result<String, JwtError> {
        self.jwt_handler.issue(user_id, role, self.token_ttl)
    }

    /// Validate and decode a JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            JwtHandler::new(b"test_secret_key_at_least_32_bytes!"),
            Duration::minutes(30),
        )
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("my_password", &hash, 12, "user")
            .expect("Authentication failed");

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.user_id, 12);
        assert_eq!(decoded.role, "user");
        assert_eq!(decoded.exp, result.expires_at);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.authenticate("wrong_password", &hash, 12, "user");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("my_password", "not-a-phc-string", 12, "user");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_generate_token_uses_configured_ttl() {
        let authenticator = authenticator();

        let token = authenticator.generate_token(3, "admin").unwrap();
        let claims = authenticator.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat.unwrap(), 30 * 60);
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        assert!(authenticator.validate_token("invalid.token.here").is_err());
    }
}
