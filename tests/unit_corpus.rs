// Unit tests for corpus loading and compilation.
//
// Covers the observable contract of the corpus loader: construction-time
// path checks, JSON validation, and the exact shape of the compiled text.

use std::path::PathBuf;

use gazette::config::Config;
use gazette::corpus::compile::{compile, ARTICLE_CHAR_BUDGET};
use gazette::corpus::article::Article;
use gazette::corpus::Corpus;

fn test_config(docs_path: PathBuf) -> Config {
    Config {
        docs_path,
        openai_api_key: String::new(),
        db_path: ":memory:".to_string(),
        wordnet_dir: PathBuf::from("/nonexistent"),
        embedding_url: String::new(),
        embedding_model: String::new(),
    }
}

fn article(body: &str) -> Article {
    Article {
        fulltext: body.to_string(),
        title: None,
        date: None,
        url: None,
    }
}

// ============================================================
// Construction — path checks
// ============================================================

#[test]
fn open_nonexistent_path_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().to_path_buf());

    let err = Corpus::open(dir.path().join("no_such_file.json"), &config).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn open_invalid_json_errors_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().to_path_buf();
    let path = docs.join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    let config = test_config(docs);
    let corpus = Corpus::open(&path, &config).unwrap();
    let err = corpus.load().unwrap_err();
    assert!(
        err.to_string().contains("not a valid JSON file"),
        "Unexpected error: {err}"
    );
}

// ============================================================
// Compilation — joined, truncated, whitespace-stripped
// ============================================================

#[test]
fn compiled_corpus_is_truncated_bodies_joined_by_period() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().to_path_buf();
    let path = docs.join("articles.json");

    let long_body = "a".repeat(ARTICLE_CHAR_BUDGET + 10);
    let articles = vec![
        article("First article body"),
        article(&long_body),
        article("Third article body"),
    ];
    std::fs::write(&path, serde_json::to_string(&articles).unwrap()).unwrap();

    let config = test_config(docs);
    let corpus = Corpus::open(&path, &config).unwrap();
    let compiled = corpus.compile().unwrap();

    let expected = format!(
        "First article body.{}.Third article body",
        "a".repeat(ARTICLE_CHAR_BUDGET)
    );
    assert_eq!(compiled.text, expected);
    assert_eq!(compiled.article_count, 3);
    assert_eq!(compiled.truncated_count, 1);
}

#[test]
fn compile_strips_whitespace_trailing_sentence_final_periods() {
    let articles = vec![
        article("The session closed.  \nMarkets reacted."),
        article("A second article."),
    ];
    let compiled = compile(&articles).unwrap();

    assert!(!compiled.text.contains(".  "));
    assert!(compiled.text.starts_with("The session closed.\nMarkets reacted."));
    // The join period and the article's own final period collapse cleanly
    assert!(compiled.text.contains("Markets reacted..A second article."));
}

#[test]
fn compile_single_article_has_no_join_separator() {
    let compiled = compile(&[article("Only body")]).unwrap();
    assert_eq!(compiled.text, "Only body");
}
