// Colored terminal output for analysis results and retrieval hits.
//
// This module handles all terminal-specific formatting: colors, tables,
// previews. The main.rs display logic delegates here.

use colored::Colorize;

use super::truncate_chars;
use crate::corpus::compile::CompiledCorpus;
use crate::retrieval::index::SearchHit;

/// Display compilation statistics after `gazette compile`.
pub fn display_compile_stats(corpus: &CompiledCorpus, source: &str) {
    println!("\n{}", format!("=== Compiled corpus ({source}) ===").bold());
    println!("  Articles:   {}", corpus.article_count);
    if corpus.truncated_count > 0 {
        println!(
            "  Truncated:  {} (cut at the per-article character budget)",
            corpus.truncated_count.to_string().yellow()
        );
    }
    println!("  Characters: {}", corpus.text.chars().count());
}

/// Display a flat word list (frequency matches, hyponyms).
pub fn display_words(heading: &str, words: &[String]) {
    println!("\n{}", format!("=== {heading} ===").bold());
    if words.is_empty() {
        println!("  (none)");
        return;
    }
    for word in words {
        println!("  {word}");
    }
    println!("\n  {} words", words.len());
}

/// Display TF-IDF ranked keywords with their scores.
pub fn display_keywords(ranked: &[(String, f32)]) {
    println!("\n{}", "=== Ranked keywords ===".bold());
    for (i, (word, score)) in ranked.iter().enumerate() {
        println!("  {:>3}. {:<28} {:.4}", i + 1, word.bold(), score);
    }
}

/// Display retrieval hits with similarity scores and content previews.
pub fn display_hits(query: &str, hits: &[SearchHit]) {
    println!("\n{}", format!("=== Matches for {query:?} ===").bold());
    if hits.is_empty() {
        println!("  No indexed chunks to search. Run `gazette index` first.");
        return;
    }

    for (i, hit) in hits.iter().enumerate() {
        let score_str = format!("{:.3}", hit.score);
        let colored_score = if hit.score >= 0.8 {
            score_str.bright_green()
        } else if hit.score >= 0.5 {
            score_str.bright_yellow()
        } else {
            score_str.dimmed()
        };

        println!(
            "  {:>2}. [chunk {} @ char {}] similarity {}",
            i + 1,
            hit.chunk_index,
            hit.start_index,
            colored_score
        );
        println!("      {}", truncate_chars(&hit.content, 160).dimmed());
    }
}
