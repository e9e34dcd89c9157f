use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod login;
pub mod refresh_token;
pub mod register;

/// Map a classified failure to a gRPC status.
///
/// Only the classification reaches the client; internal detail stays in logs.
impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField(_) => Status::invalid_argument(err.to_string()),
            AuthError::InvalidCredentials => Status::unauthenticated("invalid email or password"),
            AuthError::UserAlreadyExists(_) => Status::already_exists("user already exists"),
            AuthError::TenantNotFound(_) => Status::not_found("app not found"),
            AuthError::InvalidToken => Status::unauthenticated("invalid token"),
            AuthError::HashingFailure { .. } | AuthError::Internal { .. } => {
                Status::internal("internal error")
            }
        }
    }
}
