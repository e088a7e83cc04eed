use std::collections::HashMap;

use crate::domain::{
    common::entities::app_errors::CoreError,
    nutrition::entities::{FoodLabel, NutritionFacts},
};

/// Label to nutrition facts lookup. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct NutritionCatalog {
    index: HashMap<String, FoodLabel>,
}

impl NutritionCatalog {
    pub fn new() -> Self {
        let index = FoodLabel::ALL
            .iter()
            .map(|label| (normalize_label(label.as_str()), *label))
            .collect();

        Self { index }
    }

    pub fn lookup(&self, label: &str) -> Option<(FoodLabel, NutritionFacts)> {
        self.index
            .get(&normalize_label(label))
            .map(|food| (*food, food.facts()))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Fails if any of `labels` has no entry. Run against the detector
    /// vocabulary before serving traffic.
    pub fn ensure_covers<'a>(
        &self,
        labels: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), CoreError> {
        let missing: Vec<&str> = labels
            .into_iter()
            .filter(|label| self.lookup(label).is_none())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(CoreError::validation(
            format!("nutrition catalog has no entry for {} label(s)", missing.len()),
            missing.join(", "),
        ))
    }
}

impl Default for NutritionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
