use serde_json::Value;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7},
    meal_analysis::entities::MealAnalysis,
};

/// Placeholder the prompt asks the model to put in `scan_id`.
pub const SCAN_ID_PLACEHOLDER: &str = "auto_generated";

/// Parses sanitized model output into a [`MealAnalysis`].
///
/// Required: `meal_summary`, `total_carbs_est`, `components` and
/// `diasense_advice.risk_level`. Unknown fields are ignored. Every failure
/// carries `clean_text` as its raw response.
pub fn parse_meal_analysis(clean_text: &str) -> Result<MealAnalysis, CoreError> {
    let value: Value = serde_json::from_str(clean_text).map_err(|e| {
        tracing::error!("Model reply is not valid JSON: {}", e);
        CoreError::validation(format!("Model reply is not valid JSON: {}", e), clean_text)
    })?;

    if !value.is_object() {
        return Err(CoreError::validation(
            "Model reply is not a JSON object",
            clean_text,
        ));
    }

    let mut analysis: MealAnalysis = serde_json::from_value(value).map_err(|e| {
        tracing::error!("Invalid meal analysis format: {}", e);
        CoreError::validation(format!("Invalid meal analysis format: {}", e), clean_text)
    })?;

    let scan_id = analysis.scan_id.trim();
    if scan_id.is_empty() || scan_id == SCAN_ID_PLACEHOLDER {
        analysis.scan_id = generate_uuid_v7().to_string();
    }

    Ok(analysis)
}
