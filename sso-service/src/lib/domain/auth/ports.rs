use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RefreshTokenCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for the authentication workflows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with an email and password.
    ///
    /// # Returns
    /// Identifier assigned by the user store
    ///
    /// # Errors
    /// * `MissingField` - Email or password is empty
    /// * `UserAlreadyExists` - Email is already registered
    /// * `HashingFailure` - Password could not be hashed
    /// * `Internal` - Storage failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Verify credentials and issue an access/refresh token pair for an app.
    ///
    /// # Errors
    /// * `MissingField` - Email, password or app id is empty
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `TenantNotFound` - App id is not registered
    /// * `HashingFailure` - Stored hash is unusable
    /// * `Internal` - Storage or signing failed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Exchange a valid refresh token for a new token pair.
    ///
    /// The presented refresh token is not consumed.
    ///
    /// # Errors
    /// * `MissingField` - Refresh token or app id is empty
    /// * `TenantNotFound` - App id is not registered
    /// * `InvalidToken` - Token rejected, or its subject no longer exists
    /// * `Internal` - Storage or signing failed
    async fn refresh_token(&self, command: RefreshTokenCommand) -> Result<TokenPair, AuthError>;
}

/// User store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Email uniqueness is enforced here, atomically with the insert.
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<UserId, RepositoryError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}

/// Tenant registry: resolves an app to its signing secrets.
#[async_trait]
pub trait AppRepository: Send + Sync + 'static {
    /// Retrieve app by identifier.
    ///
    /// # Returns
    /// Optional app (None if not registered)
    ///
    /// # Errors
    /// * `InvalidRecord` - Stored app violates its invariants
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, RepositoryError>;
}
