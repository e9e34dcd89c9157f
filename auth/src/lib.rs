//! Credential and token primitives for the SSO service.
//!
//! - Password hashing (Argon2id)
//! - Compact HS256 tokens with a typed claim set, keyed per tenant secret
//! - Token-pair issuance and refresh-token validation
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user(1, "a@x.com", 1, Duration::minutes(15)).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! assert_eq!(handler.decode(&token).unwrap(), claims);
//! ```
//!
//! ## Session Issuance
//! ```
//! use auth::{Authenticator, SigningSecrets, TokenSubject, TokenTtl};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(TokenTtl::new(Duration::minutes(15), Duration::days(30)));
//! let secrets = SigningSecrets {
//!     access: b"tenant_access_secret",
//!     refresh: b"tenant_refresh_secret",
//! };
//! let subject = TokenSubject { user_id: 1, email: "a@x.com".into(), app_id: 1 };
//!
//! let pair = auth.issue_tokens(&subject, secrets).unwrap();
//! let claims = auth.validate_refresh_token(&pair.refresh_token, secrets).unwrap();
//! assert_eq!(claims.email, "a@x.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::Authenticator;
pub use authenticator::SigningSecrets;
pub use authenticator::TokenPair;
pub use authenticator::TokenSubject;
pub use authenticator::TokenTtl;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
