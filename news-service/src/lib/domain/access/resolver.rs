use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use super::errors::AccessError;
use super::models::Principal;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Turns a bearer token into the authenticated principal.
#[async_trait]
pub trait IdentityResolverPort: Send + Sync + 'static {
    /// Resolve a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token is malformed, expired, forged, or its user no longer exists
    /// * `Storage` - User lookup failed
    async fn resolve(&self, token: &str) -> Result<Principal, AccessError>;
}

/// Token-backed identity resolver.
///
/// The role embedded in the token is only a hint: the principal always
/// carries the role currently stored for the user, so a demotion takes
/// effect on the next request instead of at token expiry.
pub struct IdentityResolver<UR>
where
    UR: UserRepository,
{
    authenticator: Arc<Authenticator>,
    user_repository: Arc<UR>,
}

impl<UR> IdentityResolver<UR>
where
    UR: UserRepository,
{
    pub fn new(authenticator: Arc<Authenticator>, user_repository: Arc<UR>) -> Self {
        Self {
            authenticator,
            user_repository,
        }
    }
}

#[async_trait]
impl<UR> IdentityResolverPort for IdentityResolver<UR>
where
    UR: UserRepository,
{
    async fn resolve(&self, token: &str) -> Result<Principal, AccessError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(reason = %e, "Rejected bearer token");
            AccessError::InvalidCredentials
        })?;

        let user_id = UserId(claims.user_id);
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(|e| AccessError::Storage(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists");
                AccessError::InvalidCredentials
            })?;

        if user.role.as_str() != claims.role {
            tracing::debug!(
                user_id = %user_id,
                token_role = %claims.role,
                current_role = %user.role,
                "Role changed since token issuance"
            );
        }

        Ok(Principal::new(user.id, user.role))
    }
}
