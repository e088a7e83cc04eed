use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    domain::{
        authentication::value_objects::AuthMode,
        common::{DiaSenseConfig, entities::app_errors::CoreError, services::Service},
        nutrition::{catalog::NutritionCatalog, entities::DETECTOR_CLASSES},
    },
    infrastructure::{
        detector::http_detector::HttpFoodDetector, identity::identity_toolkit::IdentityToolkitClient,
        llm::gemini_client::GeminiLLMClient,
    },
};

pub type DiaSenseService = Service<IdentityToolkitClient, GeminiLLMClient, HttpFoodDetector>;

/// Wires the production adapters from configuration.
///
/// Missing credentials do not abort startup: the affected capability is
/// reported at error level and its requests fail until the process is
/// restarted with the setting in place.
pub async fn create_service(config: DiaSenseConfig) -> Result<DiaSenseService, CoreError> {
    let catalog = Arc::new(NutritionCatalog::new());
    catalog.ensure_covers(DETECTOR_CLASSES.iter().map(|label| label.as_str()))?;

    let auth_mode = resolve_auth_mode(&config)?;

    let llm_client = match config.vision.gemini_api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => {
            Some(GeminiLLMClient::new(key.to_string(), &config.vision)?)
        }
        _ => {
            error!("GEMINI_API_KEY is not set: meal analysis requests will fail");
            None
        }
    };

    let detector = match config.detector.url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            Some(HttpFoodDetector::new(url.to_string(), &config.detector)?)
        }
        _ => {
            info!("DETECTOR_URL is not set: local food detection is disabled");
            None
        }
    };

    let service = Service::new(
        auth_mode,
        llm_client,
        detector,
        catalog,
        config.ingestion,
        config.detector.confidence_threshold,
    );

    let capabilities = service.capabilities();
    info!(
        vision = capabilities.vision,
        auth_mode = %capabilities.auth_mode,
        detector = capabilities.detector,
        "DiaSense service ready"
    );

    Ok(service)
}

fn resolve_auth_mode(
    config: &DiaSenseConfig,
) -> Result<AuthMode<IdentityToolkitClient>, CoreError> {
    let identity = &config.identity;

    match identity.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => {
            if identity.insecure_dev_auth {
                warn!("INSECURE_DEV_AUTH is ignored because IDENTITY_API_KEY is set");
            }
            let client = IdentityToolkitClient::new(key.to_string(), identity)?;
            Ok(AuthMode::IdentityProvider(client))
        }
        _ if identity.insecure_dev_auth => {
            warn!(
                "INSECURE DEVELOPMENT AUTH ENABLED: any bearer token is accepted. Never use this in production"
            );
            Ok(AuthMode::InsecureDevelopment)
        }
        _ => {
            error!("IDENTITY_API_KEY is not set: every authenticated request will be rejected");
            Ok(AuthMode::Unconfigured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{DetectorConfig, IdentityConfig, VisionConfig};

    #[tokio::test]
    async fn test_empty_config_starts_with_everything_disabled() {
        let service = create_service(DiaSenseConfig::default()).await.unwrap();

        let capabilities = service.capabilities();
        assert!(!capabilities.vision);
        assert!(!capabilities.detector);
        assert_eq!(capabilities.auth_mode, "unconfigured");
    }

    #[tokio::test]
    async fn test_full_config_enables_every_capability() {
        let config = DiaSenseConfig {
            vision: VisionConfig {
                gemini_api_key: Some("gemini-key".to_string()),
                ..Default::default()
            },
            identity: IdentityConfig {
                api_key: Some("identity-key".to_string()),
                insecure_dev_auth: true,
                ..Default::default()
            },
            detector: DetectorConfig {
                url: Some("http://localhost:9000".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let capabilities = create_service(config).await.unwrap().capabilities();
        assert!(capabilities.vision);
        assert!(capabilities.detector);
        assert_eq!(capabilities.auth_mode, "identity_provider");
    }

    #[tokio::test]
    async fn test_insecure_flag_without_identity_key() {
        let config = DiaSenseConfig {
            identity: IdentityConfig {
                insecure_dev_auth: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let service = create_service(config).await.unwrap();
        assert_eq!(service.capabilities().auth_mode, "insecure_development");
    }
}
