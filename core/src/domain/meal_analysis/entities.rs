use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::nutrition::value_objects::GlycemicIndex;

/// Result of a remote meal analysis. Field names are the wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealAnalysis {
    #[serde(default)]
    pub scan_id: String,
    pub meal_summary: String,
    pub total_carbs_est: u32,
    /// In model output order.
    pub components: Vec<MealComponent>,
    pub diasense_advice: DiaSenseAdvice,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub status: AnalysisStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealComponent {
    pub name: String,
    #[serde(default)]
    pub portion_est: String,
    pub carbs_g: u32,
    pub glycemic_index: GlycemicIndex,
    /// Shape of the expected glucose response, e.g. fast spike or delayed rise.
    #[serde(default)]
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiaSenseAdvice {
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub prediction: String,
    #[serde(default)]
    pub suggested_bolus_strategy: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RiskLevel {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(
        alias = "medium",
        alias = "MEDIUM",
        alias = "Moderate",
        alias = "moderate",
        alias = "MODERATE"
    )]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    #[default]
    Success,
    Failure,
}

impl MealAnalysis {
    /// Stamps the boundary metadata onto a freshly parsed analysis.
    pub fn stamped(self, filename: Option<String>) -> Self {
        Self {
            filename,
            status: AnalysisStatus::Success,
            ..self
        }
    }

    /// Sum of component carbs. Widened so model-supplied values cannot overflow.
    pub fn component_carbs_total(&self) -> u64 {
        self.components.iter().map(|c| u64::from(c.carbs_g)).sum()
    }
}
