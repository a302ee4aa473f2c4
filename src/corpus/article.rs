// Article records — the normalized JSON form produced by extraction.
//
// A source file is a JSON array of these records. Only `fulltext` is
// required; extraction carries title/date/url through when the raw dump
// has them, and we ignore any other fields older extractions may have left.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::error;

/// A single extracted news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// The full article body — the only field the pipeline requires.
    pub fulltext: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Load a JSON array of article records from disk.
///
/// A parse failure is logged before being returned so the operator sees
/// which file was malformed even when the caller swallows the error chain.
pub fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match serde_json::from_str::<Vec<Article>>(&raw) {
        Ok(articles) => Ok(articles),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Article file is not valid JSON");
            Err(e).with_context(|| format!("{} is not a valid JSON file", path.display()))
        }
    }
}
