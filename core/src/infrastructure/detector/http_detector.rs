use reqwest::{Client, header::CONTENT_TYPE};
use serde::Deserialize;
use tracing::{error, instrument, warn};

use crate::domain::{
    common::{DetectorConfig, entities::app_errors::CoreError},
    detection::{
        entities::{BoundingBox, DetectionRecord},
        ports::FoodDetector,
    },
    ingestion::entities::DecodedImage,
    nutrition::entities::FoodLabel,
};

/// Client for the detection sidecar that hosts the food model.
///
/// The sidecar answers `POST /predict?conf=<threshold>` with the model's raw
/// box rows, `[x1, y1, x2, y2, confidence, class_id]`, in pixel space.
#[derive(Debug, Clone)]
pub struct HttpFoodDetector {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    boxes: Vec<[f32; 6]>,
}

impl HttpFoodDetector {
    pub fn new(base_url: String, config: &DetectorConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CoreError::ExternalServiceError(format!(
                    "Failed to build detector HTTP client: {}",
                    e
                ))
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

/// Maps a class id to its label. Ids outside the vocabulary keep a
/// `class_<id>` placeholder so the catalog lookup rejects them downstream.
fn label_for_class(class_id: f32) -> String {
    if class_id.is_finite() && class_id >= 0.0 && class_id.fract() == 0.0 {
        if let Some(label) = FoodLabel::from_class_id(class_id as usize) {
            return label.as_str().to_string();
        }
        return format!("class_{}", class_id as usize);
    }
    format!("class_{}", class_id)
}

fn to_records(rows: Vec<[f32; 6]>, confidence_threshold: f32) -> Vec<DetectionRecord> {
    rows.into_iter()
        .filter_map(|[x1, y1, x2, y2, confidence, class_id]| {
            // Also rejects NaN
            if !(0.0..=1.0).contains(&confidence) {
                warn!(confidence, class_id, "Dropping detection with out-of-range confidence");
                return None;
            }
            if confidence < confidence_threshold {
                return None;
            }
            match BoundingBox::new(x1, y1, x2, y2) {
                Some(bounding_box) => Some(DetectionRecord::new(
                    label_for_class(class_id),
                    confidence,
                    bounding_box,
                )),
                None => {
                    warn!(x1, y1, x2, y2, class_id, "Dropping degenerate detection box");
                    None
                }
            }
        })
        .collect()
}

impl FoodDetector for HttpFoodDetector {
    #[instrument(skip_all, fields(width = image.width, height = image.height, confidence_threshold))]
    async fn detect(
        &self,
        image: DecodedImage,
        confidence_threshold: f32,
    ) -> Result<Vec<DetectionRecord>, CoreError> {
        let url = format!("{}/predict", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("conf", confidence_threshold)])
            .header(CONTENT_TYPE, image.mime_type)
            .body(image.data)
            .send()
            .await
            .map_err(|e| {
                error!("Detector request failed: {}", e);
                CoreError::ExternalServiceError(format!("Detector error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Detector error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Detector returned error: {} - {}",
                status, error_text
            )));
        }

        let predictions: PredictResponse = response.json().await.map_err(|e| {
            error!("Failed to parse detector response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse detector response: {}", e))
        })?;

        Ok(to_records(predictions.boxes, confidence_threshold))
    }
}
