use tonic::Status;

use crate::domain::auth::models::RefreshTokenCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RefreshRequest;
use crate::proto::RefreshResponse;

pub async fn refresh_token<S: AuthServicePort>(
    service: &S,
    request: RefreshRequest,
) -> Result<RefreshResponse, Status> {
    let tokens = service
        .refresh_token(RefreshTokenCommand::new(request.refresh_token, request.app_id))
        .await?;

    Ok(RefreshResponse {
        token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    })
}
