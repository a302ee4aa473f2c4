// Corpus handling — article loading, extraction routing, and compilation.
//
// A corpus starts from either a pre-processed JSON file of article records
// or a raw newswire dump. Raw dumps are routed through extraction first,
// and the corpus then points at the JSON written to the compiled-docs
// directory.

pub mod article;
pub mod compile;
pub mod extraction;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::config::Config;
use article::Article;
use compile::CompiledCorpus;

/// A source of article records, resolved to a JSON file on disk.
#[derive(Debug)]
pub struct Corpus {
    file_path: PathBuf,
}

impl Corpus {
    /// Open a corpus from a source path.
    ///
    /// Fails when the path does not exist. Paths outside the compiled-docs
    /// directory are treated as raw dumps: they are extracted first and the
    /// corpus re-points at the JSON written under `config.docs_path`.
    pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("File {} does not exist", path.display());
        }

        if path.starts_with(&config.docs_path) {
            return Ok(Self {
                file_path: path.to_path_buf(),
            });
        }

        warn!(
            path = %path.display(),
            docs_path = %config.docs_path.display(),
            "File is not in the compiled-docs directory; it will be extracted first"
        );
        let file_path = extraction::extract_to_json(path, &config.docs_path)?;

        Ok(Self { file_path })
    }

    /// The resolved JSON file this corpus reads from.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the article records.
    pub fn load(&self) -> Result<Vec<Article>> {
        article::load_articles(&self.file_path)
    }

    /// Load and compile all article bodies into one text.
    pub fn compile(&self) -> Result<CompiledCorpus> {
        let articles = self.load()?;
        compile::compile(&articles)
    }
}
