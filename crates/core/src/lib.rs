pub mod reference;
pub mod result;

pub use reference::{
    AyurvedicIngredient, BeneficialCompound, Category, IngredientReference, NamePair,
    ReferenceError,
};
pub use result::ClassificationResult;
