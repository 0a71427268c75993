pub mod matcher;
pub mod tokenizer;

pub use matcher::{classify, classify_text};
pub use tokenizer::{Segmentation, Tokenizer};
