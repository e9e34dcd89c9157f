use tonic::Status;

use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let user_id = service
        .register(RegisterCommand::new(request.email, request.password))
        .await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}
