use tonic::Status;

use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let tokens = service
        .login(LoginCommand::new(
            request.email,
            request.password,
            request.app_id,
        ))
        .await?;

    Ok(LoginResponse {
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    })
}
