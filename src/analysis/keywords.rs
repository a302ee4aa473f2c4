// TF-IDF keyword ranking over the article set.
//
// Uses the `keyword_extraction` crate with each article treated as a
// separate document for IDF computation — words that appear in every
// article get downweighted, while words distinctive to certain articles
// get boosted.

use anyhow::Result;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};
use tracing::info;

/// Rank the corpus vocabulary by TF-IDF score, highest first.
///
/// Each element of `articles` is one document. The library handles
/// tokenization, stopword removal, and scoring.
pub fn ranked_keywords(articles: &[String], top_n: usize) -> Result<Vec<(String, f32)>> {
    if articles.is_empty() {
        anyhow::bail!("No articles to analyze — cannot rank keywords");
    }

    let stop_words: Vec<String> = get(LANGUAGE::English);

    let params = TfIdfParams::UnprocessedDocuments(articles, &stop_words, None);
    let tfidf = TfIdf::new(params);

    let ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(top_n);

    if ranked.is_empty() {
        anyhow::bail!(
            "TF-IDF produced no keywords from {} articles — bodies may be too short or uniform",
            articles.len()
        );
    }

    info!(
        keywords = ranked.len(),
        top_keyword = &ranked[0].0,
        top_score = ranked[0].1,
        "Ranked corpus keywords"
    );

    Ok(ranked)
}
