use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordError;
use auth::TokenSubject;
use auth::TokenTtl;
use tokio::sync::OnceCell;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::Password;
use crate::domain::auth::models::RefreshTokenCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppRepository;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;

/// Plaintext behind the hash that unknown-email logins are verified against.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Domain service implementing Register, Login and RefreshToken.
///
/// Stateless between requests: users live in `UR`, tenant secrets in `AR`.
pub struct AuthService<UR, AR>
where
    UR: UserRepository,
    AR: AppRepository,
{
    users: Arc<UR>,
    apps: Arc<AR>,
    authenticator: Authenticator,
    decoy_hash: OnceCell<String>,
}

impl<UR, AR> AuthService<UR, AR>
where
    UR: UserRepository,
    AR: AppRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User store implementation
    /// * `apps` - Tenant registry implementation
    /// * `ttl` - Access and refresh token lifetimes, read once at startup
    pub fn new(users: Arc<UR>, apps: Arc<AR>, ttl: &TokenTtl) -> Self {
        Self {
            users,
            apps,
            authenticator: Authenticator::new(*ttl),
            decoy_hash: OnceCell::new(),
        }
    }

    async fn hash_password(
        &self,
        op: &'static str,
        password: Password,
    ) -> Result<String, AuthError> {
        let authenticator = self.authenticator.clone();

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
            .await
            .map_err(|e| AuthError::internal(op, e))?
            .map_err(|e| {
                tracing::error!(op, error = %e, "Failed to hash password");
                hashing_failure(op, e)
            })
    }

    async fn verify_password(
        &self,
        op: &'static str,
        password: Password,
        stored_hash: String,
    ) -> Result<bool, AuthError> {
        let authenticator = self.authenticator.clone();

        tokio::task::spawn_blocking(move || {
            authenticator.verify_password(password.as_str(), &stored_hash)
        })
        .await
        .map_err(|e| AuthError::internal(op, e))?
        .map_err(|e| {
            tracing::error!(op, error = %e, "Stored password hash is unusable");
            hashing_failure(op, e)
        })
    }

    /// Spend one Argon2 verification on a login whose email is unknown, so it
    /// takes as long as a wrong password for an existing account.
    async fn verify_against_decoy(&self, op: &'static str, password: Password) {
        let decoy_hash = match self
            .decoy_hash
            .get_or_try_init(|| self.hash_decoy(op))
            .await
        {
            Ok(hash) => hash.clone(),
            Err(e) => {
                tracing::error!(op, error = %e, "Failed to prepare decoy password hash");
                return;
            }
        };

        if let Err(e) = self.verify_password(op, password, decoy_hash).await {
            tracing::error!(op, error = %e, "Decoy password verification failed");
        }
    }

    async fn hash_decoy(&self, op: &'static str) -> Result<String, AuthError> {
        let decoy = Password::new(DECOY_PASSWORD.to_string())?;
        self.hash_password(op, decoy).await
    }

    async fn resolve_app(&self, op: &'static str, app_id: AppId) -> Result<App, AuthError> {
        self.apps
            .find_by_id(app_id)
            .await
            .map_err(|e| storage_failure(op, e))?
            .ok_or_else(|| {
                tracing::warn!(op, app_id = %app_id, "App not found");
                AuthError::TenantNotFound(app_id)
            })
    }

    fn issue_tokens(
        &self,
        op: &'static str,
        user: &User,
        app: &App,
    ) -> Result<TokenPair, AuthError> {
        // Claims are rebuilt from the stored user, never copied from a presented token
        let subject = TokenSubject {
            user_id: user.id.0,
            email: user.email.as_str().to_string(),
            app_id: app.id.get(),
        };

        self.authenticator
            .issue_tokens(&subject, app.signing_secrets())
            .map_err(|e| {
                tracing::error!(op, app_id = %app.id, error = %e, "Failed to sign tokens");
                AuthError::internal(op, e)
            })
    }
}

fn hashing_failure(op: &'static str, err: PasswordError) -> AuthError {
    AuthError::HashingFailure {
        op,
        message: err.to_string(),
    }
}

fn storage_failure(op: &'static str, err: RepositoryError) -> AuthError {
    tracing::error!(op, error = %err, "Storage operation failed");
    AuthError::internal(op, err)
}

#[async_trait]
impl<UR, AR> AuthServicePort for AuthService<UR, AR>
where
    UR: UserRepository,
    AR: AppRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        const OP: &str = "AuthService::register";

        let email = EmailAddress::new(command.email)?;
        let password = Password::new(command.password)?;

        tracing::info!(op = OP, email = %email, "Registering user");

        let password_hash = self.hash_password(OP, password).await?;

        let user_id = self
            .users
            .create(&email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::UserAlreadyExists(existing) => {
                    tracing::warn!(op = OP, email = %existing, "User already exists");
                    AuthError::UserAlreadyExists(existing)
                }
                other => storage_failure(OP, other),
            })?;

        tracing::info!(op = OP, user_id = %user_id, "User registered");

        Ok(user_id)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        const OP: &str = "AuthService::login";

        let email = EmailAddress::new(command.email)?;
        let password = Password::new(command.password)?;
        let app_id = AppId::new(command.app_id)?;

        tracing::info!(op = OP, email = %email, app_id = %app_id, "Attempting to login user");

        // Unknown email and wrong password must be indistinguishable to the caller
        let user = match self
            .users
            .find_by_email(email.as_str())
            .await
            .map_err(|e| storage_failure(OP, e))?
        {
            Some(user) => user,
            None => {
                tracing::warn!(op = OP, email = %email, "User not found");
                self.verify_against_decoy(OP, password).await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self
            .verify_password(OP, password, user.password_hash.clone())
            .await?
        {
            tracing::info!(op = OP, user_id = %user.id, "Invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let app = self.resolve_app(OP, app_id).await?;
        let tokens = self.issue_tokens(OP, &user, &app)?;

        tracing::info!(op = OP, user_id = %user.id, app_id = %app.id, "User logged in");

        Ok(tokens)
    }

    async fn refresh_token(&self, command: RefreshTokenCommand) -> Result<TokenPair, AuthError> {
        const OP: &str = "AuthService::refresh_token";

        if command.refresh_token.is_empty() {
            return Err(AuthError::MissingField("refresh_token"));
        }
        let app_id = AppId::new(command.app_id)?;

        let app = self.resolve_app(OP, app_id).await?;

        let claims = self
            .authenticator
            .validate_refresh_token(&command.refresh_token, app.signing_secrets())
            .map_err(|_| {
                tracing::info!(op = OP, app_id = %app_id, "Refresh token rejected");
                AuthError::InvalidToken
            })?;

        if claims.app_id != app_id.get() {
            tracing::warn!(
                op = OP,
                app_id = %app_id,
                token_app_id = claims.app_id,
                "Refresh token was issued for another app"
            );
            return Err(AuthError::InvalidToken);
        }

        let user = self
            .users
            .find_by_email(&claims.email)
            .await
            .map_err(|e| storage_failure(OP, e))?
            .ok_or_else(|| {
                tracing::warn!(op = OP, uid = claims.uid, "Refresh token subject no longer exists");
                AuthError::InvalidToken
            })?;

        // The presented token is not revoked; it stays valid until its own expiry
        let tokens = self.issue_tokens(OP, &user, &app)?;

        tracing::info!(op = OP, user_id = %user.id, app_id = %app.id, "Tokens refreshed");

        Ok(tokens)
    }
}
