use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_word_delimiters, r"[\s,;]+");
re!(re_phrase_delimiters, r"[,;\r\n]+");
re!(re_whitespace_run, r"\s+");

/// How recognized text is cut into candidate tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segmentation {
    /// Every whitespace run, comma and semicolon is a delimiter.
    #[default]
    Words,
    /// Only commas, semicolons and line breaks delimit; a token may hold
    /// several words ("sodium lauryl sulfate").
    Phrases,
}

impl std::str::FromStr for Segmentation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "words" => Ok(Segmentation::Words),
            "phrases" => Ok(Segmentation::Phrases),
            other => Err(format!("Unknown segmentation: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    pub segmentation: Segmentation,
}

impl Tokenizer {
    pub fn new(segmentation: Segmentation) -> Self {
        Self { segmentation }
    }

    /// Lowercase `text` and split it into non-empty trimmed tokens, left to
    /// right. Repeated tokens are kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        match self.segmentation {
            Segmentation::Words => re_word_delimiters()
                .split(&lowered)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            Segmentation::Phrases => re_phrase_delimiters()
                .split(&lowered)
                .map(|segment| re_whitespace_run().replace_all(segment.trim(), " "))
                .filter(|t| !t.is_empty())
                .map(|t| t.into_owned())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        Tokenizer::default().tokenize(text)
    }

    #[test]
    fn splits_on_whitespace_comma_and_semicolon() {
        assert_eq!(
            words("Aqua, Glycerin;Sodium  Benzoate\nParfum"),
            vec!["aqua", "glycerin", "sodium", "benzoate", "parfum"]
        );
    }

    #[test]
    fn lowercases_everything() {
        assert_eq!(words("METHYLPARABEN"), vec!["methylparaben"]);
    }

    #[test]
    fn drops_empty_segments() {
        assert_eq!(words(" ,, ;; \t\n"), Vec::<String>::new());
        assert_eq!(words(""), Vec::<String>::new());
    }

    #[test]
    fn keeps_duplicates_in_order() {
        assert_eq!(words("water, Water, WATER"), vec!["water", "water", "water"]);
    }

    #[test]
    fn other_punctuation_stays_in_token() {
        assert_eq!(words("(ci 77891). peg-40"), vec!["(ci", "77891).", "peg-40"]);
    }

    #[test]
    fn phrases_keep_multi_word_ingredients() {
        let tokenizer = Tokenizer::new(Segmentation::Phrases);
        assert_eq!(
            tokenizer.tokenize("Sodium Lauryl Sulfate, Methylparaben, Water"),
            vec!["sodium lauryl sulfate", "methylparaben", "water"]
        );
    }

    #[test]
    fn phrases_split_on_line_breaks_and_collapse_spaces() {
        let tokenizer = Tokenizer::new(Segmentation::Phrases);
        assert_eq!(
            tokenizer.tokenize("Vitamin   E\r\n Aloe\tVera ;; "),
            vec!["vitamin e", "aloe vera"]
        );
    }

    #[test]
    fn segmentation_from_str() {
        use std::str::FromStr;
        assert_eq!(Segmentation::from_str("Phrases").unwrap(), Segmentation::Phrases);
        assert_eq!(Segmentation::from_str("words").unwrap(), Segmentation::Words);
        assert!(Segmentation::from_str("sentences").is_err());
    }
}
