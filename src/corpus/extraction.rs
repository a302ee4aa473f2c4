// Extraction — normalize a raw newswire XML dump into article records.
//
// Raw dumps wrap each article's body in a <fulltext> element, usually
// alongside <title>, <date>, and <url>. We pull those fields out with a
// lightweight tag scan rather than a full XML parse: the dumps are
// machine-written and flat, and the pipeline only needs the element text.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::info;

use super::article::Article;

/// Extract article records from a raw dump and write them as JSON into
/// `docs_dir`, named after the source file's stem.
///
/// Returns the path of the JSON file written. Fails when no article
/// bodies are found in the source.
pub fn extract_to_json(source: &Path, docs_dir: &Path) -> Result<PathBuf> {
    let raw = std::fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;

    let articles = extract_articles(&raw)?;
    if articles.is_empty() {
        anyhow::bail!(
            "No <fulltext> elements found in {} — is this a newswire dump?",
            source.display()
        );
    }

    std::fs::create_dir_all(docs_dir)
        .with_context(|| format!("Failed to create {}", docs_dir.display()))?;

    let stem = source
        .file_stem()
        .context("Source path has no file name")?;
    let out_path = docs_dir.join(stem).with_extension("json");

    let json = serde_json::to_string_pretty(&articles)?;
    std::fs::write(&out_path, json)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    info!(
        source = %source.display(),
        output = %out_path.display(),
        articles = articles.len(),
        "Extracted articles"
    );

    Ok(out_path)
}

/// Pull article records out of raw XML text.
///
/// When the dump groups fields under <article> elements, each group becomes
/// one record; otherwise every <fulltext> element found becomes a record of
/// its own.
pub fn extract_articles(raw: &str) -> Result<Vec<Article>> {
    let article_re = Regex::new(r"(?s)<article[^>]*>(.*?)</article>")
        .context("Failed to compile article pattern")?;

    let blocks: Vec<&str> = article_re
        .captures_iter(raw)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let mut articles = Vec::new();

    if blocks.is_empty() {
        for body in element_texts(raw, "fulltext")? {
            articles.push(Article {
                fulltext: body,
                title: None,
                date: None,
                url: None,
            });
        }
    } else {
        for block in blocks {
            let Some(fulltext) = element_texts(block, "fulltext")?.into_iter().next() else {
                continue;
            };
            articles.push(Article {
                fulltext,
                title: element_texts(block, "title")?.into_iter().next(),
                date: element_texts(block, "date")?.into_iter().next(),
                url: element_texts(block, "url")?.into_iter().next(),
            });
        }
    }

    Ok(articles)
}

/// All text contents of `<tag>...</tag>` elements, entities unescaped.
fn element_texts(raw: &str, tag: &str) -> Result<Vec<String>> {
    let pattern = format!(r"(?s)<{tag}[^>]*>(.*?)</{tag}>");
    let re = Regex::new(&pattern)
        .with_context(|| format!("Failed to compile pattern for <{tag}>"))?;

    Ok(re
        .captures_iter(raw)
        .filter_map(|c| c.get(1).map(|m| unescape_entities(m.as_str().trim())))
        .collect())
}

/// Replace the five predefined XML entities with their characters.
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_article_blocks() {
        let raw = "<corpus>\
            <article><title>First</title><fulltext>Body one.</fulltext></article>\
            <article><fulltext>Body two.</fulltext><url>http://example.com</url></article>\
            </corpus>";

        let articles = extract_articles(raw).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("First"));
        assert_eq!(articles[0].fulltext, "Body one.");
        assert_eq!(articles[1].url.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_extract_bare_fulltext_elements() {
        let raw = "<fulltext>One</fulltext><fulltext>Two</fulltext>";
        let articles = extract_articles(raw).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].fulltext, "Two");
    }

    #[test]
    fn test_extract_skips_articles_without_fulltext() {
        let raw = "<article><title>No body</title></article>\
                   <article><fulltext>Present</fulltext></article>";
        let articles = extract_articles(raw).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].fulltext, "Present");
    }

    #[test]
    fn test_unescape_entities() {
        assert_eq!(
            unescape_entities("Smith &amp; Jones said &quot;no&quot;"),
            "Smith & Jones said \"no\""
        );
    }

    #[test]
    fn test_extract_to_json_writes_named_after_stem() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("dump_2019.xml");
        std::fs::write(&source, "<fulltext>Body.</fulltext>").unwrap();

        let docs = dir.path().join("docs");
        let out = extract_to_json(&source, &docs).unwrap();
        assert_eq!(out, docs.join("dump_2019.json"));

        let written = std::fs::read_to_string(&out).unwrap();
        let parsed: Vec<Article> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed[0].fulltext, "Body.");
    }

    #[test]
    fn test_extract_to_json_empty_dump_errors() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("empty.xml");
        std::fs::write(&source, "<corpus></corpus>").unwrap();

        let err = extract_to_json(&source, dir.path()).unwrap_err();
        assert!(err.to_string().contains("No <fulltext> elements"));
    }
}
