use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::nutrition::value_objects::{GlycemicIndex, GlycemicRisk};

/// Pixel-space box with `x1 < x2` and `y1 < y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    /// Returns `None` for degenerate or non-finite boxes.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Self> {
        let finite = [x1, y1, x2, y2].iter().all(|v| v.is_finite());
        (finite && x1 < x2 && y1 < y2).then_some(Self { x1, y1, x2, y2 })
    }
}

/// One raw detection from the food detector.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRecord {
    pub label: String,
    pub confidence: f32,
    pub bounding_box: BoundingBox,
}

impl DetectionRecord {
    pub fn new(label: impl Into<String>, confidence: f32, bounding_box: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bounding_box,
        }
    }
}

/// One distinct food found in the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AggregatedDetection {
    #[serde(rename = "item")]
    pub label: String,
    /// kcal per 100g
    pub calories: u32,
    /// Best confidence seen for this label in the request.
    pub confidence: f32,
    /// Carbohydrates per 100g
    pub carbs_g: u32,
    pub glycemic_index: GlycemicIndex,
    /// Glycemic load of 100g
    pub glycemic_load: f32,
    pub glycemic_risk: GlycemicRisk,
}
