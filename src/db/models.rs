// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// Metadata describing the persisted retrieval index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMeta {
    /// The JSON article file the corpus was compiled from
    pub source: String,
    /// Embedding model the chunks were embedded with
    pub model: String,
    /// How many chunks the splitter produced in total
    pub total_chunks: usize,
    /// How many of those were embedded and stored
    pub indexed_chunks: usize,
    pub created_at: String,
}
