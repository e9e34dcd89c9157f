use thiserror::Error;

use crate::domain::auth::models::AppId;

/// Required input that was empty or absent
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{0} is required")]
pub struct MissingFieldError(pub &'static str);

/// Error for App construction failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("App {0} uses the same secret for access and refresh tokens")]
    SharedSecret(AppId),
}

/// Failures reported by storage adapters.
///
/// Never returned to callers of the service; it is re-classified into
/// [`AuthError`] with the originating operation attached.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AppError> for RepositoryError {
    fn from(err: AppError) -> Self {
        RepositoryError::InvalidRecord(err.to_string())
    }
}

/// Classified outcome of a failed Register, Login or RefreshToken.
///
/// `Display` output is safe to show to clients: infrastructure detail lives
/// only in `Debug` and in the service logs.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("App not found: {0}")]
    TenantNotFound(AppId),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Password hashing failed in {op}")]
    HashingFailure { op: &'static str, message: String },

    #[error("Internal error in {op}")]
    Internal { op: &'static str, message: String },
}

impl AuthError {
    pub(crate) fn internal(op: &'static str, err: impl ToString) -> Self {
        AuthError::Internal {
            op,
            message: err.to_string(),
        }
    }
}

impl From<MissingFieldError> for AuthError {
    fn from(err: MissingFieldError) -> Self {
        AuthError::MissingField(err.0)
    }
}
