use std::fmt;

use crate::domain::auth::errors::AppError;
use crate::domain::auth::errors::MissingFieldError;

/// Registered user as held by the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// User unique identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Application (tenant) identifier. Zero means "not supplied".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(i32);

impl AppId {
    /// # Errors
    /// * `MissingFieldError` - `id` is zero
    pub fn new(id: i32) -> Result<Self, MissingFieldError> {
        if id == 0 {
            Err(MissingFieldError("app_id"))
        } else {
            Ok(Self(id))
        }
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email identity of a user. Only emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, MissingFieldError> {
        if email.is_empty() {
            Err(MissingFieldError("email"))
        } else {
            Ok(Self(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password supplied by a client.
///
/// `Debug` is redacted so the value cannot end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Result<Self, MissingFieldError> {
        if password.is_empty() {
            Err(MissingFieldError("password"))
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Tenant signing configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct App {
    pub id: AppId,
    pub name: String,
    secret: String,
    refresh_secret: String,
}

impl App {
    /// # Errors
    /// * `SharedSecret` - Access and refresh secrets are identical
    pub fn new(
        id: AppId,
        name: String,
        secret: String,
        refresh_secret: String,
    ) -> Result<Self, AppError> {
        if secret == refresh_secret {
            return Err(AppError::SharedSecret(id));
        }

        Ok(Self {
            id,
            name,
            secret,
            refresh_secret,
        })
    }

    pub fn signing_secrets(&self) -> auth::SigningSecrets<'_> {
        auth::SigningSecrets {
            access: self.secret.as_bytes(),
            refresh: self.refresh_secret.as_bytes(),
        }
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Command to register a new user, carrying raw client input
#[derive(Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Command to log a user into an app
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    pub app_id: i32,
}

impl LoginCommand {
    pub fn new(email: String, password: String, app_id: i32) -> Self {
        Self {
            email,
            password,
            app_id,
        }
    }
}

/// Command to exchange a refresh token for a new token pair
#[derive(Clone)]
pub struct RefreshTokenCommand {
    pub refresh_token: String,
    pub app_id: i32,
}

impl RefreshTokenCommand {
    pub fn new(refresh_token: String, app_id: i32) -> Self {
        Self {
            refresh_token,
            app_id,
        }
    }
}

pub use auth::TokenPair;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_id_zero_is_missing() {
        assert_eq!(AppId::new(0), Err(MissingFieldError("app_id")));
        assert_eq!(AppId::new(1).map(|id| id.get()), Ok(1));
    }

    #[test]
    fn test_empty_email_and_password() {
        assert_eq!(
            EmailAddress::new(String::new()),
            Err(MissingFieldError("email"))
        );
        assert_eq!(
            Password::new(String::new()),
            Err(MissingFieldError("password"))
        );
    }

    #[test]
    fn test_app_rejects_shared_secret() {
        let id = AppId::new(1).unwrap();
        let result = App::new(id, "web".to_string(), "s".to_string(), "s".to_string());
        assert_eq!(result, Err(AppError::SharedSecret(id)));
    }

    #[test]
    fn test_secrets_are_not_debug_printed() {
        let app = App::new(
            AppId::new(1).unwrap(),
            "web".to_string(),
            "top-secret".to_string(),
            "top-refresh".to_string(),
        )
        .unwrap();
        let password = Password::new("hunter2".to_string()).unwrap();

        assert!(!format!("{:?}", app).contains("top-secret"));
        assert!(!format!("{:?}", password).contains("hunter2"));
    }
}
