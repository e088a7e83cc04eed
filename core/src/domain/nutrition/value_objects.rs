use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Glycemic index band. Model replies are matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum GlycemicIndex {
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

impl GlycemicIndex {
    /// Bands a numeric glycemic index: 55 and below is low, 70 and above is high.
    pub fn from_value(value: u8) -> Self {
        match value {
            0..=55 => GlycemicIndex::Low,
            56..=69 => GlycemicIndex::Medium,
            _ => GlycemicIndex::High,
        }
    }
}

/// Risk band derived from glycemic load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum GlycemicRisk {
    Safe,
    Moderate,
    High,
}

impl GlycemicRisk {
    /// Above 20 is high, above 10 is moderate.
    pub fn from_load(load: f32) -> Self {
        if load > 20.0 {
            GlycemicRisk::High
        } else if load > 10.0 {
            GlycemicRisk::Moderate
        } else {
            GlycemicRisk::Safe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glycemic_band_boundaries() {
        assert_eq!(GlycemicIndex::from_value(55), GlycemicIndex::Low);
        assert_eq!(GlycemicIndex::from_value(56), GlycemicIndex::Medium);
        assert_eq!(GlycemicIndex::from_value(69), GlycemicIndex::Medium);
        assert_eq!(GlycemicIndex::from_value(70), GlycemicIndex::High);
    }

    #[test]
    fn test_glycemic_risk_boundaries() {
        assert_eq!(GlycemicRisk::from_load(0.0), GlycemicRisk::Safe);
        assert_eq!(GlycemicRisk::from_load(10.0), GlycemicRisk::Safe);
        assert_eq!(GlycemicRisk::from_load(10.01), GlycemicRisk::Moderate);
        assert_eq!(GlycemicRisk::from_load(20.0), GlycemicRisk::Moderate);
        assert_eq!(GlycemicRisk::from_load(20.01), GlycemicRisk::High);
    }

    #[test]
    fn test_glycemic_index_accepts_loose_casing() {
        let parsed: Vec<GlycemicIndex> =
            serde_json::from_str(r#"["low", "Moderate", "HIGH", "Medium"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                GlycemicIndex::Low,
                GlycemicIndex::Medium,
                GlycemicIndex::High,
                GlycemicIndex::Medium
            ]
        );
    }
}
