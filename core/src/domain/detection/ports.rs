use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, detection::entities::DetectionRecord,
    ingestion::entities::DecodedImage,
};

/// Object detector over food images
#[cfg_attr(test, mockall::automock)]
pub trait FoodDetector: Send + Sync {
    /// Returns every detection at or above `confidence_threshold`.
    fn detect(
        &self,
        image: DecodedImage,
        confidence_threshold: f32,
    ) -> impl Future<Output = Result<Vec<DetectionRecord>, CoreError>> + Send;
}
