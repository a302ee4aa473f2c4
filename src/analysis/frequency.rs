// Word frequency analysis.
//
// Tokenizes on word boundaries (three characters or longer), lowercases,
// and drops English stopwords before counting. The headline operation
// returns the words whose count is exactly equal to the requested
// frequency — equal, not at-least. Callers that want a band of
// frequencies should use the full table.

use std::collections::HashMap;

use anyhow::{Context, Result};
use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

/// Word tokens: three or more word characters between boundaries.
const WORD_PATTERN: &str = r"\b\w{3,}\b";

/// Count token occurrences in `text`, stopwords excluded.
///
/// Tokens shorter than three characters never make it into the table.
pub fn frequency_table(text: &str) -> Result<HashMap<String, usize>> {
    let tokenizer = Regex::new(WORD_PATTERN).context("Failed to compile word pattern")?;

    let lowered = text.to_lowercase();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenizer.find_iter(&lowered) {
        *counts.entry(token.as_str().to_string()).or_insert(0) += 1;
    }

    for stopword in get(LANGUAGE::English) {
        counts.remove(&stopword);
    }

    Ok(counts)
}

/// Words whose occurrence count equals `target` exactly.
///
/// Order of the returned list is unspecified.
pub fn words_at_frequency(text: &str, target: usize) -> Result<Vec<String>> {
    let counts = frequency_table(text)?;
    Ok(counts
        .into_iter()
        .filter(|(_, count)| *count == target)
        .map(|(word, _)| word)
        .collect())
}
