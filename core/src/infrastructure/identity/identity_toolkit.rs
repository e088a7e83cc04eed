use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::{
    authentication::{ports::IdentityProvider, value_objects::Identity},
    common::{IdentityConfig, entities::app_errors::CoreError},
};

/// Verifies ID tokens through the Identity Toolkit `accounts:lookup` endpoint.
#[derive(Debug, Clone)]
pub struct IdentityToolkitClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
}

impl IdentityToolkitClient {
    pub fn new(api_key: String, config: &IdentityConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CoreError::ExternalServiceError(format!(
                    "Failed to build identity HTTP client: {}",
                    e
                ))
            })?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

fn rejected() -> CoreError {
    CoreError::Unauthorized("Invalid or expired token".to_string())
}

impl IdentityProvider for IdentityToolkitClient {
    #[instrument(skip_all)]
    async fn lookup(&self, token: String) -> Result<Identity, CoreError> {
        let url = format!("{}/v1/accounts:lookup", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequest { id_token: &token })
            .send()
            .await
            .map_err(|e| {
                warn!("Identity lookup request failed: {}", e.without_url());
                rejected()
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("Identity lookup rejected token with status {}", status);
            return Err(rejected());
        }

        let lookup: LookupResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse identity lookup response: {}", e.without_url());
            rejected()
        })?;

        lookup
            .users
            .into_iter()
            .next()
            .map(|user| Identity::User(user.local_id))
            .ok_or_else(rejected)
    }
}
