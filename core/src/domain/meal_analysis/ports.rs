use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    detection::entities::AggregatedDetection,
    meal_analysis::{entities::MealAnalysis, value_objects::MealUpload},
};

/// LLM Client trait for calling multimodal AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends `prompt` with one image and returns the model's reply verbatim.
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        mime_type: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for meal analysis
pub trait MealAnalysisService: Send + Sync {
    /// Remote path: vision model reply parsed into a [`MealAnalysis`].
    fn analyze_meal(
        &self,
        identity: Identity,
        upload: MealUpload,
    ) -> impl Future<Output = Result<MealAnalysis, CoreError>> + Send;

    /// Local path: detector output collapsed to one item per food.
    fn detect_food(
        &self,
        upload: MealUpload,
    ) -> impl Future<Output = Result<Vec<AggregatedDetection>, CoreError>> + Send;
}
