use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    authentication::value_objects::AuthMode, common::IngestionConfig,
    nutrition::catalog::NutritionCatalog,
};

/// Application service. Every field is read-only after construction, so one
/// instance is shared by all requests.
#[derive(Debug)]
pub struct Service<IP, LLM, D> {
    pub(crate) auth_mode: AuthMode<IP>,
    pub(crate) llm_client: Option<LLM>,
    pub(crate) detector: Option<D>,
    pub(crate) catalog: Arc<NutritionCatalog>,
    pub(crate) ingestion: IngestionConfig,
    pub(crate) confidence_threshold: f32,
}

/// Which capabilities were configured at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ServiceCapabilities {
    pub vision: bool,
    pub auth_mode: String,
    pub detector: bool,
}

impl<IP, LLM, D> Service<IP, LLM, D> {
    pub fn new(
        auth_mode: AuthMode<IP>,
        llm_client: Option<LLM>,
        detector: Option<D>,
        catalog: Arc<NutritionCatalog>,
        ingestion: IngestionConfig,
        confidence_threshold: f32,
    ) -> Self {
        Self {
            auth_mode,
            llm_client,
            detector,
            catalog,
            ingestion,
            confidence_threshold,
        }
    }

    pub fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities {
            vision: self.llm_client.is_some(),
            auth_mode: self.auth_mode.kind().to_string(),
            detector: self.detector.is_some(),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.ingestion.max_upload_bytes
    }
}
