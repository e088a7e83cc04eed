use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use diasense_core::domain::authentication::{ports::AuthService, value_objects::Identity};
use tracing::debug;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

/// Extractor for a verified caller. Rejects with 401 before any request body
/// is read.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>().cloned() {
            return Ok(RequiredIdentity(identity));
        }

        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| {
                        ApiError::Unauthorized("Malformed Authorization header".to_string())
                    })?
                    .to_string(),
            ),
            None => None,
        };

        let app_state = AppState::from_ref(state);
        let identity = app_state.service.authorize(header).await.map_err(|e| {
            debug!("Authorization failed: {}", e);
            ApiError::from(e)
        })?;

        parts.extensions.insert(identity.clone());

        Ok(RequiredIdentity(identity))
    }
}
