// Corpus compilation — concatenate article bodies into one text.
//
// Each article body is truncated to a fixed character budget before
// joining. The budget approximates the embedding provider's token limit;
// it counts characters, not tokens, so the truncation is lossy and
// deliberately approximate.

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::debug;

use super::article::Article;

/// Per-article character budget applied before concatenation.
pub const ARTICLE_CHAR_BUDGET: usize = 150_000;

/// Whitespace runs that trail a sentence-final period at end of line.
const TRAILING_PATTERN: &str = r"(?m)\.\s+$";

/// The compiled corpus text plus compilation statistics.
#[derive(Debug, Clone)]
pub struct CompiledCorpus {
    pub text: String,
    pub article_count: usize,
    /// How many articles were cut at the character budget.
    pub truncated_count: usize,
}

/// Compile all article bodies into one big chunk of text.
///
/// Bodies are truncated to [`ARTICLE_CHAR_BUDGET`] characters, joined with
/// a period, and whitespace trailing sentence-final periods is removed.
pub fn compile(articles: &[Article]) -> Result<CompiledCorpus> {
    let mut truncated_count = 0;

    let bodies: Vec<&str> = articles
        .iter()
        .map(|art| {
            let body = truncate_to_chars(&art.fulltext, ARTICLE_CHAR_BUDGET);
            if body.len() < art.fulltext.len() {
                truncated_count += 1;
            }
            body
        })
        .collect();

    let joined = bodies.join(".");

    let pattern = Regex::new(TRAILING_PATTERN)
        .context("Failed to compile trailing-whitespace pattern")?;
    let text = pattern.replace_all(&joined, ".").into_owned();

    debug!(
        articles = articles.len(),
        truncated = truncated_count,
        chars = text.chars().count(),
        "Compiled corpus"
    );

    Ok(CompiledCorpus {
        text,
        article_count: articles.len(),
        truncated_count,
    })
}

/// Borrow at most `max_chars` characters from the front of `text`.
///
/// Cuts on a character boundary, never mid-codepoint.
fn truncate_to_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
