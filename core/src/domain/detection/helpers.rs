use std::collections::HashMap;

use crate::domain::{
    common::entities::app_errors::CoreError,
    detection::entities::{AggregatedDetection, DetectionRecord},
    nutrition::{
        catalog::NutritionCatalog,
        entities::{FoodLabel, NutritionFacts},
    },
};

/// Collapses raw detections into one record per food.
///
/// The detector reports several overlapping boxes per object; only the most
/// confident box of each food is kept (the first one on ties). Labels are
/// resolved against the catalog first, so spellings of the same food share
/// one entry under its canonical name. Output is sorted by descending
/// confidence, ties in first-seen order. Fails without a partial result if a
/// label has no catalog entry.
pub fn aggregate_detections(
    records: &[DetectionRecord],
    catalog: &NutritionCatalog,
) -> Result<Vec<AggregatedDetection>, CoreError> {
    let mut best: Vec<(FoodLabel, NutritionFacts, &DetectionRecord)> = Vec::new();
    let mut positions: HashMap<FoodLabel, usize> = HashMap::new();

    for record in records {
        let (food, facts) = catalog.lookup(&record.label).ok_or_else(|| {
            CoreError::validation(
                format!(
                    "Detected label '{}' has no nutrition catalog entry",
                    record.label
                ),
                record.label.clone(),
            )
        })?;

        match positions.get(&food) {
            Some(&index) => {
                if record.confidence > best[index].2.confidence {
                    best[index].2 = record;
                }
            }
            None => {
                positions.insert(food, best.len());
                best.push((food, facts, record));
            }
        }
    }

    let mut aggregated: Vec<AggregatedDetection> = best
        .into_iter()
        .map(|(food, facts, record)| AggregatedDetection {
            label: food.as_str().to_string(),
            calories: facts.calories,
            confidence: record.confidence,
            carbs_g: facts.carbs_g,
            glycemic_index: facts.glycemic_category(),
            glycemic_load: facts.glycemic_load(),
            glycemic_risk: facts.glycemic_risk(),
        })
        .collect();

    // Stable sort keeps first-seen order between equal confidences
    aggregated.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    Ok(aggregated)
}
