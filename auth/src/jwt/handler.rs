use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::RawClaims;
use super::errors::JwtError;

/// JWT token handler for issuing and validating access tokens.
///
/// Signs with a symmetric HMAC secret. The algorithm is fixed at
/// construction and is the only one accepted on decode.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key, signing with HS256.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    /// - Changing the secret invalidates every outstanding token
    pub fn new(secret: &[u8]) -> Self {
        Self::build(secret, Algorithm::HS256)
    }

    /// Create a JWT handler for an explicit HMAC algorithm.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `algorithm` - Algorithm name (`HS256`, `HS384` or `HS512`)
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Name is unknown or not a symmetric HMAC algorithm
    pub fn with_algorithm(secret: &[u8], algorithm: &str) -> Result<Self, JwtError> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| JwtError::UnsupportedAlgorithm(algorithm.to_string()))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                Ok(Self::build(secret, algorithm))
            }
            other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    fn build(secret: &[u8], algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
        }
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue a token for a user that expires `ttl` from now.
    ///
    /// # Arguments
    /// * `user_id` - Subject identifier
    /// * `role` - Role name to embed
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: i64, role: &str, ttl: Duration) -> Result<String, JwtError> {
        self.encode(&Claims::for_user(user_id, role, ttl))
    }

    /// Decode and validate a JWT token.
    ///
    /// The signature is checked before any claim is read.
    ///
    /// # Errors
    /// * `TokenExpired` - The exp claim is in the past
    /// * `InvalidToken` - Signature mismatch or unexpected algorithm
    /// * `MissingClaim` - Signed payload lacks user_id, role or exp
    /// * `DecodingFailed` - Token is malformed
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<RawClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => {
                    JwtError::InvalidToken("signature mismatch".to_string())
                }
                ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidToken("unexpected algorithm".to_string())
                }
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Claims::try_from(token_data.claims)
    }
}
