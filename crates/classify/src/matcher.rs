use labelwise_core::{ClassificationResult, IngredientReference};

use crate::tokenizer::Tokenizer;

/// Classify `tokens` against `reference`.
///
/// Each token is checked against every category independently. Within a
/// category the first keyword or record in reference order wins, and an entry
/// already present in the result is not added again. Tokens must already be
/// lowercase (see [`Tokenizer::tokenize`]).
pub fn classify(reference: &IngredientReference, tokens: &[String]) -> ClassificationResult {
    let mut result = ClassificationResult::default();

    for token in tokens {
        if reference.harmful().iter().any(|keyword| token.contains(keyword.as_str())) {
            push_distinct(&mut result.harmful, token);
        }

        if let Some((record, _)) = reference.beneficial().find(|(_, names)| names.found_in(token)) {
            push_distinct(&mut result.beneficial, record);
        }

        if let Some((record, _)) = reference.ayurvedic().find(|(_, names)| names.found_in(token)) {
            push_distinct(&mut result.ayurvedic, record);
        }
    }

    result
}

/// Tokenize `text` and classify the tokens in one step.
pub fn classify_text(
    reference: &IngredientReference,
    tokenizer: &Tokenizer,
    text: &str,
) -> ClassificationResult {
    classify(reference, &tokenizer.tokenize(text))
}

fn push_distinct<T>(list: &mut Vec<T>, item: &T)
where
    T: PartialEq + Clone,
{
    if !list.contains(item) {
        list.push(item.clone());
    }
}
