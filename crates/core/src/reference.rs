use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// A compound credited as beneficial, known by a commercial and a chemical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficialCompound {
    pub commercial: String,
    pub chemical: String,
}

impl BeneficialCompound {
    pub fn new(commercial: &str, chemical: &str) -> Self {
        Self {
            commercial: commercial.to_string(),
            chemical: chemical.to_string(),
        }
    }
}

/// A traditional-medicine ingredient, known by a common and a scientific name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyurvedicIngredient {
    pub common: String,
    pub scientific: String,
}

impl AyurvedicIngredient {
    pub fn new(common: &str, scientific: &str) -> Self {
        Self {
            common: common.to_string(),
            scientific: scientific.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Harmful,
    Beneficial,
    Ayurvedic,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Harmful => write!(f, "harmful"),
            Category::Beneficial => write!(f, "beneficial"),
            Category::Ayurvedic => write!(f, "ayurvedic"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Failed to read ingredient reference: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse ingredient reference: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Empty {category} entry at index {index}")]
    EmptyEntry { category: Category, index: usize },
}

/// Lowercased pair of names for one reference record. A token matches the
/// record when either name occurs anywhere inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePair {
    first: String,
    second: String,
}

impl NamePair {
    fn new(first: &str, second: &str) -> Option<Self> {
        let first = first.trim().to_lowercase();
        let second = second.trim().to_lowercase();
        if first.is_empty() || second.is_empty() {
            return None;
        }
        Some(Self { first, second })
    }

    /// `token` is expected to be lowercase already.
    pub fn found_in(&self, token: &str) -> bool {
        token.contains(&self.first) || token.contains(&self.second)
    }
}

/// On-disk layout of the reference document.
#[derive(Debug, Deserialize)]
struct ReferenceFile {
    harmful: Vec<String>,
    beneficial: Vec<BeneficialCompound>,
    ayurvedic: Vec<AyurvedicIngredient>,
}

/// The three-category ingredient dataset tokens are matched against.
///
/// Built once at startup and shared read-only afterwards; there is no way to
/// mutate it after construction. Lowercase needles are computed up front so
/// classification never re-normalizes reference names.
#[derive(Debug, Clone)]
pub struct IngredientReference {
    harmful: Vec<String>,
    beneficial: Vec<(BeneficialCompound, NamePair)>,
    ayurvedic: Vec<(AyurvedicIngredient, NamePair)>,
}

impl IngredientReference {
    pub fn new(
        harmful: Vec<String>,
        beneficial: Vec<BeneficialCompound>,
        ayurvedic: Vec<AyurvedicIngredient>,
    ) -> Result<Self, ReferenceError> {
        let harmful = harmful
            .into_iter()
            .enumerate()
            .map(|(index, keyword)| {
                let keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    Err(ReferenceError::EmptyEntry { category: Category::Harmful, index })
                } else {
                    Ok(keyword)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let beneficial = beneficial
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                NamePair::new(&record.commercial, &record.chemical)
                    .map(|names| (record, names))
                    .ok_or(ReferenceError::EmptyEntry { category: Category::Beneficial, index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ayurvedic = ayurvedic
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                NamePair::new(&record.common, &record.scientific)
                    .map(|names| (record, names))
                    .ok_or(ReferenceError::EmptyEntry { category: Category::Ayurvedic, index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { harmful, beneficial, ayurvedic })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ReferenceError> {
        let file: ReferenceFile = serde_json::from_str(json)?;
        Self::new(file.harmful, file.beneficial, file.ayurvedic)
    }

    /// Read and validate a reference document from disk.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Harmful keywords, lowercased, in document order.
    pub fn harmful(&self) -> &[String] {
        &self.harmful
    }

    /// Beneficial records in document order, each with its lowercase needles.
    pub fn beneficial(&self) -> impl Iterator<Item = (&BeneficialCompound, &NamePair)> {
        self.beneficial.iter().map(|(record, names)| (record, names))
    }

    /// Ayurvedic records in document order, each with its lowercase needles.
    pub fn ayurvedic(&self) -> impl Iterator<Item = (&AyurvedicIngredient, &NamePair)> {
        self.ayurvedic.iter().map(|(record, names)| (record, names))
    }

    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Harmful => self.harmful.len(),
            Category::Beneficial => self.beneficial.len(),
            Category::Ayurvedic => self.ayurvedic.len(),
        }
    }
}
