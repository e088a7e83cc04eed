use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{error, instrument, warn};

use crate::domain::{
    common::{RetryConfig, VisionConfig, entities::app_errors::CoreError},
    meal_analysis::ports::LLMClient,
};

const RETRYABLE_STATUS_CODES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
    retry: RetryConfig,
    permits: Arc<Semaphore>,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(api_key: String, config: &VisionConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CoreError::ExternalServiceError(format!("Failed to build LLM HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            model_name: config.gemini_model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retry: config.retry.clone(),
            permits: Arc::new(Semaphore::new(config.max_concurrent_requests.max(1))),
        })
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let _permit = self.permits.acquire().await.map_err(|_| {
            CoreError::ExternalServiceError("LLM client is shutting down".to_string())
        })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let mut attempt = 0;
        loop {
            let result = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&request)
                .send()
                .await;

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    // The query string carries the API key
                    let e = e.without_url();
                    if is_transient(&e) && attempt < self.retry.max_retries {
                        attempt += 1;
                        let backoff = self.retry.backoff_for(attempt);
                        warn!(
                            "Gemini API transport error: {} - retry {}/{} after {:?}",
                            e, attempt, self.retry.max_retries, backoff
                        );
                        tokio::time::sleep(backoff).await;
                        continue;
                    }
                    error!("Gemini API request failed: {}", e);
                    return Err(CoreError::ExternalServiceError(format!(
                        "LLM API error: {}",
                        e
                    )));
                }
            };

            let status = response.status();

            if RETRYABLE_STATUS_CODES.contains(&status) && attempt < self.retry.max_retries {
                attempt += 1;
                let backoff = self.retry.backoff_for(attempt);
                warn!(
                    "Gemini API returned {} - retry {}/{} after {:?}",
                    status, attempt, self.retry.max_retries, backoff
                );
                tokio::time::sleep(backoff).await;
                continue;
            }

            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                error!("Gemini API error: {} - {}", status, error_text);
                return Err(CoreError::ExternalServiceError(format!(
                    "LLM API returned error: {} - {}",
                    status, error_text
                )));
            }

            let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
                let e = e.without_url();
                error!("Failed to parse Gemini response: {}", e);
                CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
            })?;

            return gemini_response
                .candidates
                .into_iter()
                .filter_map(|c| c.content)
                .flat_map(|c| c.parts)
                .find_map(|p| p.text)
                .ok_or_else(|| {
                    CoreError::ExternalServiceError("No response from LLM".to_string())
                });
        }
    }
}

/// Connect failures, timeouts and other request-level errors are worth
/// another attempt. Body decoding errors are not.
fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}

impl LLMClient for GeminiLLMClient {
    #[instrument(skip_all, fields(model = %self.model_name, mime_type = %mime_type, image_bytes = image_data.len()))]
    async fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        let base64_image = general_purpose::STANDARD.encode(&image_data);

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: base64_image,
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            }),
        };

        self.call_gemini_api(request).await
    }
}
