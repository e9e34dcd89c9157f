use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetimes of the two tokens of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenTtl {
    pub fn new(access: Duration, refresh: Duration) -> Self {
        Self { access, refresh }
    }
}

/// The pair of secrets a tenant signs its tokens with.
///
/// Access and refresh secrets must differ so a refresh token never verifies
/// as an access token.
#[derive(Debug, Clone, Copy)]
pub struct SigningSecrets<'a> {
    pub access: &'a [u8],
    pub refresh: &'a [u8],
}

/// Identity a token pair is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: i64,
    pub email: String,
    pub app_id: i32,
}

/// Result of a successful issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication coordinator combining password hashing and token issuance.
///
/// Holds no per-request state; secrets are supplied per call because they
/// belong to the requesting tenant.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    ttl: TokenTtl,
}

impl Authenticator {
    pub fn new(ttl: TokenTtl) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> TokenTtl {
        self.ttl
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash. Mismatch is `Ok(false)`.
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a fresh access token and refresh token for `subject`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed or a lifetime overflows the clock
    pub fn issue_tokens(
        &self,
        subject: &TokenSubject,
        secrets: SigningSecrets<'_>,
    ) -> Result<TokenPair, JwtError> {
        let access_claims = Claims::for_user(
            subject.user_id,
            subject.email.as_str(),
            subject.app_id,
            self.ttl.access,
        )?;
        let refresh_claims = Claims::for_user(
            subject.user_id,
            subject.email.as_str(),
            subject.app_id,
            self.ttl.refresh,
        )?;

        Ok(TokenPair {
            access_token: JwtHandler::new(secrets.access).encode(&access_claims)?,
            refresh_token: JwtHandler::new(secrets.refresh).encode(&refresh_claims)?,
        })
    }

    /// Validate a refresh token against the tenant's refresh secret.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure or expiry check failed
    pub fn validate_refresh_token(
        &self,
        token: &str,
        secrets: SigningSecrets<'_>,
    ) -> Result<Claims, JwtError> {
        JwtHandler::new(secrets.refresh).decode(token)
    }

    /// Validate an access token against the tenant's access secret.
    ///
    /// Entry point for resource services that accept the access tokens this
    /// crate issues; the SSO service itself only consumes refresh tokens.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure or expiry check failed
    pub fn validate_access_token(
        &self,
        token: &str,
        secrets: SigningSecrets<'_>,
    ) -> Result<Claims, JwtError> {
        JwtHandler::new(secrets.access).decode(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRETS: SigningSecrets<'static> = SigningSecrets {
        access: b"access_secret_at_least_32_bytes!!",
        refresh: b"refresh_secret_at_least_32_bytes!",
    };

    fn authenticator() -> Authenticator {
        Authenticator::new(TokenTtl::new(Duration::minutes(15), Duration::days(30)))
    }

    fn subject() -> TokenSubject {
        TokenSubject {
            user_id: 1,
            email: "a@x.com".to_string(),
            app_id: 1,
        }
    }

    #[test]
    fn test_issue_tokens_expiries() {
        let authenticator = authenticator();
        let now = Utc::now().timestamp();

        let pair = authenticator.issue_tokens(&subject(), SECRETS).unwrap();

        let access = authenticator
            .validate_access_token(&pair.access_token, SECRETS)
            .unwrap();
        let refresh = authenticator
            .validate_refresh_token(&pair.refresh_token, SECRETS)
            .unwrap();

        assert_eq!(access.email, "a@x.com");
        assert_eq!(refresh.app_id, 1);
        assert!((access.exp - (now + 15 * 60)).abs() <= 1);
        assert!((refresh.exp - (now + 30 * 24 * 60 * 60)).abs() <= 1);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let authenticator = authenticator();
        let pair = authenticator.issue_tokens(&subject(), SECRETS).unwrap();

        assert_eq!(
            authenticator.validate_access_token(&pair.refresh_token, SECRETS),
            Err(JwtError::InvalidToken)
        );
        assert_eq!(
            authenticator.validate_refresh_token(&pair.access_token, SECRETS),
            Err(JwtError::InvalidToken)
        );
    }

    #[test]
    fn test_issue_tokens_with_out_of_range_ttl() {
        let authenticator = Authenticator::new(TokenTtl::new(
            Duration::seconds(900),
            Duration::seconds(10_000_000_000_000),
        ));

        let result = authenticator.issue_tokens(&subject(), SECRETS);
        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }

    #[test]
    fn test_hash_and_verify_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("p1").unwrap();

        assert!(authenticator.verify_password("p1", &hash).unwrap());
        assert!(!authenticator.verify_password("wrong", &hash).unwrap());
    }
}
