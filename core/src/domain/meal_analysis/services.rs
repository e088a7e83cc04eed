use tracing::{debug, info, instrument};

use crate::domain::{
    authentication::{ports::IdentityProvider, value_objects::Identity},
    common::{entities::app_errors::CoreError, services::Service},
    detection::{
        entities::AggregatedDetection, helpers::aggregate_detections, ports::FoodDetector,
    },
    ingestion::services::ingest,
    meal_analysis::{
        entities::MealAnalysis,
        parser::parse_meal_analysis,
        ports::{LLMClient, MealAnalysisService},
        sanitizer::sanitize_response,
        schema::{MEAL_ANALYSIS_PROMPT, get_meal_analysis_schema},
        value_objects::MealUpload,
    },
};

impl<IP, LLM, D> MealAnalysisService for Service<IP, LLM, D>
where
    IP: IdentityProvider,
    LLM: LLMClient,
    D: FoodDetector,
{
    #[instrument(skip(self, upload), fields(identity = %identity.id(), filename = ?upload.filename))]
    async fn analyze_meal(
        &self,
        identity: Identity,
        upload: MealUpload,
    ) -> Result<MealAnalysis, CoreError> {
        // 1. Validate and decode the upload
        let image = ingest(upload.file_bytes, &upload.content_type, &self.ingestion)?;

        let llm_client = self.llm_client.as_ref().ok_or_else(|| {
            CoreError::NotConfigured("Vision model API key is not configured".to_string())
        })?;

        // 2. Call LLM
        let raw_response = llm_client
            .generate_with_image(
                MEAL_ANALYSIS_PROMPT.to_string(),
                image.data,
                image.mime_type,
                get_meal_analysis_schema(),
            )
            .await?;

        // 3. Clean up and validate the reply
        let clean_text = sanitize_response(&raw_response);
        let analysis = parse_meal_analysis(&clean_text)?;

        let component_total = analysis.component_carbs_total();
        if u64::from(analysis.total_carbs_est) != component_total {
            debug!(
                total_carbs_est = analysis.total_carbs_est,
                component_total, "Model total carbs differ from the sum of components"
            );
        }

        info!(
            scan_id = %analysis.scan_id,
            components = analysis.components.len(),
            "Meal analyzed"
        );

        Ok(analysis.stamped(upload.filename))
    }

    #[instrument(skip(self, upload), fields(filename = ?upload.filename))]
    async fn detect_food(&self, upload: MealUpload) -> Result<Vec<AggregatedDetection>, CoreError> {
        let image = ingest(upload.file_bytes, &upload.content_type, &self.ingestion)?;

        let detector = self.detector.as_ref().ok_or_else(|| {
            CoreError::NotConfigured("Food detector is not configured".to_string())
        })?;

        let records = detector.detect(image, self.confidence_threshold).await?;
        let aggregated = aggregate_detections(&records, &self.catalog)?;

        info!(
            raw_detections = records.len(),
            items = aggregated.len(),
            "Food detected"
        );

        Ok(aggregated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        authentication::value_objects::AuthMode,
        common::{DEFAULT_CONFIDENCE_THRESHOLD, services::test_service},
        detection::{
            entities::{BoundingBox, DetectionRecord},
            ports::MockFoodDetector,
        },
        ingestion::test_utils::sample_png,
        meal_analysis::{entities::AnalysisStatus, ports::MockLLMClient},
    };

    const FENCED_REPLY: &str = "```json\n{\"scan_id\":\"auto_generated\",\"meal_summary\":\"Pasta\",\"total_carbs_est\":70,\"components\":[{\"name\":\"Pasta\",\"portion_est\":\"1 plate\",\"carbs_g\":70,\"glycemic_index\":\"Medium\",\"impact\":\"Delayed rise\"}],\"diasense_advice\":{\"risk_level\":\"High\",\"prediction\":\"Late peak\",\"suggested_bolus_strategy\":\"Dual-wave bolus\"}}\n```";

    fn upload(content_type: &str) -> MealUpload {
        MealUpload {
            file_bytes: sample_png(),
            content_type: content_type.to_string(),
            filename: Some("dinner.png".to_string()),
        }
    }

    fn record(label: &str, confidence: f32) -> DetectionRecord {
        DetectionRecord::new(
            label,
            confidence,
            BoundingBox::new(0.0, 0.0, 2.0, 2.0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_analyze_meal_parses_fenced_reply_and_stamps_result() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .withf(|prompt, _, mime_type, _| {
                prompt == MEAL_ANALYSIS_PROMPT && mime_type == "image/png"
            })
            .times(1)
            .returning(|_, _, _, _| Box::pin(async { Ok(FENCED_REPLY.to_string()) }));
        let service = test_service::build(AuthMode::InsecureDevelopment, Some(llm), None);

        let analysis = service
            .analyze_meal(Identity::Development, upload("image/png"))
            .await
            .unwrap();

        assert_eq!(analysis.meal_summary, "Pasta");
        assert_eq!(analysis.filename.as_deref(), Some("dinner.png"));
        assert_eq!(analysis.status, AnalysisStatus::Success);
        assert!(!analysis.scan_id.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_meal_rejects_non_image_before_calling_model() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image().never();
        let service = test_service::build(AuthMode::InsecureDevelopment, Some(llm), None);

        let err = service
            .analyze_meal(Identity::Development, upload("text/plain"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_analyze_meal_surfaces_validation_error_with_raw_text() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image().returning(|_, _, _, _| {
            Box::pin(async { Ok("{\"meal_summary\":\"Soup\"}".to_string()) })
        });
        let service = test_service::build(AuthMode::InsecureDevelopment, Some(llm), None);

        let err = service
            .analyze_meal(Identity::Development, upload("image/png"))
            .await
            .unwrap_err();
        assert_eq!(err.raw_response(), Some("{\"meal_summary\":\"Soup\"}"));
    }

    #[tokio::test]
    async fn test_analyze_meal_propagates_upstream_error() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image().returning(|_, _, _, _| {
            Box::pin(async { Err(CoreError::ExternalServiceError("timeout".to_string())) })
        });
        let service = test_service::build(AuthMode::InsecureDevelopment, Some(llm), None);

        let err = service
            .analyze_meal(Identity::Development, upload("image/png"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_analyze_meal_without_vision_model_is_not_configured() {
        let service = test_service::build(AuthMode::InsecureDevelopment, None, None);

        let err = service
            .analyze_meal(Identity::Development, upload("image/png"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_detect_food_aggregates_detections() {
        let mut detector = MockFoodDetector::new();
        detector
            .expect_detect()
            .withf(|image, threshold| {
                image.mime_type == "image/png" && *threshold == DEFAULT_CONFIDENCE_THRESHOLD
            })
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(vec![
                        record("apple", 0.8),
                        record("apple", 0.95),
                        record("Banana", 0.6),
                    ])
                })
            });
        let service = test_service::build(AuthMode::Unconfigured, None, Some(detector));

        let items = service.detect_food(upload("image/png")).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "apple");
        assert_eq!(items[0].confidence, 0.95);
        assert_eq!(items[1].label, "Banana");
        assert_eq!(items[1].calories, 89);
    }

    #[tokio::test]
    async fn test_detect_food_unknown_label_fails_whole_request() {
        let mut detector = MockFoodDetector::new();
        detector.expect_detect().returning(|_, _| {
            Box::pin(async { Ok(vec![record("apple", 0.9), record("class_99", 0.5)]) })
        });
        let service = test_service::build(AuthMode::Unconfigured, None, Some(detector));

        let err = service.detect_food(upload("image/png")).await.unwrap_err();
        assert_eq!(err.raw_response(), Some("class_99"));
    }

    #[tokio::test]
    async fn test_detect_food_without_detector_is_not_configured() {
        let service = test_service::build(AuthMode::Unconfigured, None, None);

        let err = service.detect_food(upload("image/png")).await.unwrap_err();
        assert!(matches!(err, CoreError::NotConfigured(_)));
    }
}
