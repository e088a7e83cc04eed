use serde_json::json;

/// Fixed instruction sent with every meal image.
pub const MEAL_ANALYSIS_PROMPT: &str = r#"You are the Individual Metabolic Learning engine of the DiaSense application.
Analyze this meal photo for a patient living with diabetes.

Tasks:
1. Identify every food visible on the plate.
2. Estimate the carbohydrates, in grams, of each component.
3. Predict the glycemic impact of each component (fast spike, delayed rise or stable).
4. Suggest an insulin action for the whole meal (standard bolus, dual-wave bolus, or wait).

Reply with ONE valid JSON object and nothing else. Do not wrap it in markdown.
Required structure:
{
  "scan_id": "auto_generated",
  "meal_summary": "string",
  "total_carbs_est": int,
  "components": [
    {
      "name": "string",
      "portion_est": "string",
      "carbs_g": int,
      "glycemic_index": "Low/Medium/High",
      "impact": "string"
    }
  ],
  "diasense_advice": {
    "risk_level": "Low/Medium/High",
    "prediction": "string",
    "suggested_bolus_strategy": "string"
  }
}
"#;

/// Returns the JSON schema for meal analysis LLM responses
pub fn get_meal_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "scan_id": { "type": "string" },
            "meal_summary": { "type": "string" },
            "total_carbs_est": { "type": "integer" },
            "components": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "portion_est": { "type": "string" },
                        "carbs_g": { "type": "integer" },
                        "glycemic_index": {
                            "type": "string",
                            "enum": ["Low", "Medium", "High"]
                        },
                        "impact": { "type": "string" }
                    },
                    "required": ["name", "portion_est", "carbs_g", "glycemic_index", "impact"]
                }
            },
            "diasense_advice": {
                "type": "object",
                "properties": {
                    "risk_level": {
                        "type": "string",
                        "enum": ["Low", "Medium", "High"]
                    },
                    "prediction": { "type": "string" },
                    "suggested_bolus_strategy": { "type": "string" }
                },
                "required": ["risk_level", "prediction", "suggested_bolus_strategy"]
            }
        },
        "required": ["meal_summary", "total_carbs_est", "components", "diasense_advice"]
    })
}
