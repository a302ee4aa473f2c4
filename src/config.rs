use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Directory where extracted article JSON is written and read
    /// (GAZETTE_DOCS_PATH env var).
    pub docs_path: PathBuf,
    /// API key for the embedding provider (OPENAI_API_KEY env var).
    pub openai_api_key: String,
    pub db_path: String,
    /// Directory containing the WordNet 3.x database files
    /// (index.noun, data.noun, and so on for the other parts of speech).
    pub wordnet_dir: PathBuf,
    /// Embedding endpoint (defaults to the OpenAI embeddings API).
    pub embedding_url: String,
    /// Embedding model name sent with each request.
    pub embedding_model: String,
}

/// Default embedding endpoint when GAZETTE_EMBEDDING_URL is unset.
pub const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1/embeddings";

/// Default embedding model when GAZETTE_EMBEDDING_MODEL is unset.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only db_path and docs_path have defaults — the API key is required
    /// for anything that touches the embedding provider.
    pub fn load() -> Result<Self> {
        let wordnet_dir = env::var("GAZETTE_WORDNET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_wordnet_dir());

        Ok(Self {
            docs_path: env::var("GAZETTE_DOCS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./compiled_docs")),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            db_path: env::var("GAZETTE_DB_PATH").unwrap_or_else(|_| "./gazette.db".to_string()),
            wordnet_dir,
            embedding_url: env::var("GAZETTE_EMBEDDING_URL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_URL.to_string()),
            embedding_model: env::var("GAZETTE_EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
        })
    }

    /// Check that the embedding provider API key is configured.
    /// Call this before any operation that embeds text.
    pub fn require_api_key(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            anyhow::bail!(
                "OPENAI_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the WordNet database directory exists.
    /// Call this before any hyponym lookup.
    pub fn require_wordnet(&self) -> Result<()> {
        if !self.wordnet_dir.is_dir() {
            anyhow::bail!(
                "WordNet database not found at {}\n\
                 Download the WNdb files and point GAZETTE_WORDNET_DIR at them.",
                self.wordnet_dir.display()
            );
        }
        Ok(())
    }
}

/// Default location for the WordNet database files when the env var is unset.
fn default_wordnet_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gazette")
        .join("wordnet")
}
