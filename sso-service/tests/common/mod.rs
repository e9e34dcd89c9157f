#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;
use sso_service::auth::errors::RepositoryError;
use sso_service::auth::models::App;
use sso_service::auth::models::AppId;
use sso_service::auth::models::EmailAddress;
use sso_service::auth::models::User;
use sso_service::auth::models::UserId;
use sso_service::auth::ports::AppRepository;
use sso_service::auth::ports::UserRepository;
use sso_service::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::proto::auth_client::AuthClient;
use sso_service::proto::auth_server::AuthServer;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;

pub const APP_ID: i32 = 1;
pub const APP_SECRET: &str = "app1-access-secret-at-least-32-bytes";
pub const APP_REFRESH_SECRET: &str = "app1-refresh-secret-at-least-32-bytes";

pub const OTHER_APP_ID: i32 = 2;
pub const OTHER_APP_SECRET: &str = "app2-access-secret-at-least-32-bytes";
pub const OTHER_APP_REFRESH_SECRET: &str = "app2-refresh-secret-at-least-32-bytes";

pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 3600;

/// User store kept in process memory
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<UserId, RepositoryError> {
        let mut users = self.users.lock().expect("user store poisoned");
        if users.contains_key(email.as_str()) {
            return Err(RepositoryError::UserAlreadyExists(email.to_string()));
        }

        let id = UserId(users.len() as i64 + 1);
        users.insert(
            email.as_str().to_string(),
            User {
                id,
                email: email.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().expect("user store poisoned");
        Ok(users.get(email).cloned())
    }
}

impl InMemoryUserRepository {
    pub fn remove(&self, email: &str) {
        self.users.lock().expect("user store poisoned").remove(email);
    }
}

/// Fixed set of apps
pub struct InMemoryAppRepository {
    apps: HashMap<AppId, App>,
}

impl InMemoryAppRepository {
    pub fn with_test_apps() -> Self {
        let apps = [
            (APP_ID, APP_SECRET, APP_REFRESH_SECRET),
            (OTHER_APP_ID, OTHER_APP_SECRET, OTHER_APP_REFRESH_SECRET),
        ]
        .into_iter()
        .map(|(id, secret, refresh_secret)| {
            let id = AppId::new(id).expect("test app id");
            let app = App::new(
                id,
                format!("test-app-{}", id),
                secret.to_string(),
                refresh_secret.to_string(),
            )
            .expect("test app secrets differ");
            (id, app)
        })
        .collect();

        Self { apps }
    }
}

#[async_trait]
impl AppRepository for InMemoryAppRepository {
    async fn find_by_id(&self, id: AppId) -> Result<Option<App>, RepositoryError> {
        Ok(self.apps.get(&id).cloned())
    }
}

/// Test application serving the gRPC API on a random local port
pub struct TestApp {
    pub address: String,
    pub client: AuthClient<Channel>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let apps = Arc::new(InMemoryAppRepository::with_test_apps());

        let ttl = auth::TokenTtl::new(
            Duration::seconds(ACCESS_TOKEN_TTL_SECS),
            Duration::seconds(REFRESH_TOKEN_TTL_SECS),
        );
        let service = Arc::new(AuthService::new(Arc::clone(&users), apps, &ttl));

        tokio::spawn(async move {
            Server::builder()
                .timeout(std::time::Duration::from_secs(10))
                .add_service(AuthServer::new(AuthGrpcService::new(service)))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Server error");
        });

        let client = AuthClient::connect(address.clone())
            .await
            .expect("Failed to connect to test server");

        Self {
            address,
            client,
            users,
        }
    }
}
