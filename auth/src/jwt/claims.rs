use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Access token payload.
///
/// Carries the subject's numeric identity and role together with the
/// expiry instant and, when present, the issuance instant (Unix seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the user the token was issued to
    pub user_id: i64,

    /// Role held by the user at issuance time
    pub role: String,

    /// Issued at (Unix timestamp), absent on tokens minted without it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `role` - Role name embedded in the token
    /// * `ttl` - Lifetime of the token (may be negative to mint an expired one)
    ///
    /// # Returns
    /// Claims with user_id, role, iat and exp set
    pub fn for_user(user_id: i64, role: impl Into<String>, ttl: Duration) -> Self {
        Self::issued_at(user_id, role, Utc::now(), ttl)
    }

    /// Create claims with an explicit issuance instant.
    pub fn issued_at(
        user_id: i64,
        role: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            user_id,
            role: role.into(),
            iat: Some(issued_at.timestamp()),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

/// Wire form used while decoding, so that a validly signed token lacking a
/// required field is reported as `MissingClaim` instead of a parse failure.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    user_id: Option<i64>,
    role: Option<String>,
    iat: Option<i64>,
    exp: Option<i64>,
}

impl TryFrom<RawClaims> for Claims {
    type Error = JwtError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let missing = |name: &str| JwtError::MissingClaim(name.to_string());

        Ok(Self {
            user_id: raw.user_id.ok_or_else(|| missing("user_id"))?,
            role: raw.role.ok_or_else(|| missing("role"))?,
            iat: raw.iat,
            exp: raw.exp.ok_or_else(|| missing("exp"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(42, "user", Duration::minutes(30));

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.role, "user");
        assert_eq!(claims.exp - claims.iat.unwrap(), 30 * 60);
    }

    #[test]
    fn test_issued_at() {
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let claims = Claims::issued_at(7, "admin", issued, Duration::hours(1));

        assert_eq!(claims.iat, Some(issued.timestamp()));
        assert_eq!(claims.exp, issued.timestamp() + 3600);
    }

    #[test]
    fn test_raw_claims_without_iat() {
        let raw: RawClaims =
            serde_json::from_value(serde_json::json!({ "user_id": 1, "role": "user", "exp": 10 }))
                .unwrap();

        let claims = Claims::try_from(raw).unwrap();

        assert_eq!(claims.iat, None);
        assert_eq!(claims.exp, 10);
    }

    #[test]
    fn test_raw_claims_missing_role() {
        let raw: RawClaims =
            serde_json::from_value(serde_json::json!({ "user_id": 1, "iat": 0, "exp": 10 }))
                .unwrap();

        assert_eq!(
            Claims::try_from(raw),
            Err(JwtError::MissingClaim("role".to_string()))
        );
    }
}
