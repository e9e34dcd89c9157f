use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claim set carried by access and refresh tokens.
///
/// Serialized as a flat JSON object: `uid`, `email`, `app_id`, `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject user identifier
    pub uid: i64,

    /// Subject email
    pub email: String,

    /// Application (tenant) the token is scoped to
    pub app_id: i32,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user session expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - The expiry falls outside the representable time range
    pub fn for_user(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!(
                "token lifetime of {}s is out of range",
                ttl.num_seconds()
            ))
        })?;

        Ok(Self {
            uid,
            email: email.into(),
            app_id,
            exp: expires_at.timestamp(),
        })
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// A token expiring at `exp` is already invalid at `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let before = Utc::now().timestamp();
        let claims = Claims::for_user(42, "a@x.com", 1, Duration::minutes(15)).unwrap();
        let after = Utc::now().timestamp();

        assert_eq!(claims.uid, 42);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.app_id, 1);
        assert!(claims.exp >= before + 15 * 60);
        assert!(claims.exp <= after + 15 * 60);
    }

    #[test]
    fn test_for_user_with_out_of_range_ttl() {
        let result = Claims::for_user(1, "a@x.com", 1, Duration::seconds(10_000_000_000_000));

        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::for_user(1, "a@x.com", 1, Duration::zero())
            .unwrap()
            .with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_wire_keys() {
        let claims = Claims::for_user(7, "a@x.com", 3, Duration::zero())
            .unwrap()
            .with_expiration(1234);
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "uid": 7, "email": "a@x.com", "app_id": 3, "exp": 1234 })
        );
    }
}
