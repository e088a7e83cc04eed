use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "user",
    summary = "Current caller",
    responses(
        (status = 200, body = UserResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ApiErrorResponse),
    ),
    security(("bearer" = [])),
)]
pub async fn get_me(
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<UserResponse>, ApiError> {
    Ok(Response::OK(UserResponse {
        id: identity.id().to_string(),
    }))
}
