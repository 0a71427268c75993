use serde::{Deserialize, Serialize};

use crate::reference::{AyurvedicIngredient, BeneficialCompound};

/// Distinct matches per category, each list in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Raw tokens that contained a harmful keyword.
    pub harmful: Vec<String>,
    pub beneficial: Vec<BeneficialCompound>,
    pub ayurvedic: Vec<AyurvedicIngredient>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        self.harmful.is_empty() && self.beneficial.is_empty() && self.ayurvedic.is_empty()
    }

    /// Number of matches across all three categories.
    pub fn total(&self) -> usize {
        self.harmful.len() + self.beneficial.len() + self.ayurvedic.len()
    }
}
