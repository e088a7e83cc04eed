use tracing::{error, instrument, warn};

use crate::domain::{
    authentication::{
        ports::{AuthService, IdentityProvider},
        value_objects::{AuthMode, Identity},
    },
    common::{entities::app_errors::CoreError, services::Service},
    detection::ports::FoodDetector,
    meal_analysis::ports::LLMClient,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(authorization_header: Option<&str>) -> Result<&str, CoreError> {
    let header = authorization_header
        .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| {
            CoreError::Unauthorized("Authorization header must use the Bearer scheme".to_string())
        })?
        .trim();

    if token.is_empty() {
        return Err(CoreError::Unauthorized("Bearer token is empty".to_string()));
    }

    Ok(token)
}

impl<IP, LLM, D> AuthService for Service<IP, LLM, D>
where
    IP: IdentityProvider,
    LLM: LLMClient,
    D: FoodDetector,
{
    #[instrument(skip_all, fields(auth_mode = self.auth_mode.kind()))]
    async fn authorize(&self, authorization_header: Option<String>) -> Result<Identity, CoreError> {
        let token = extract_bearer_token(authorization_header.as_deref())?;

        match &self.auth_mode {
            AuthMode::IdentityProvider(provider) => provider.lookup(token.to_string()).await,
            AuthMode::InsecureDevelopment => {
                warn!("INSECURE DEVELOPMENT AUTH: accepting an unverified bearer token");
                Ok(Identity::Development)
            }
            AuthMode::Unconfigured => {
                error!("Rejecting request: identity provider is not configured");
                Err(CoreError::Unauthorized(
                    "Identity provider is not configured".to_string(),
                ))
            }
        }
    }
}
