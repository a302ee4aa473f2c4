// In-memory similarity index over embedded chunks.
//
// The index is a flat list of (chunk, vector) entries; a query is scored
// against every entry by cosine similarity. At the scale this pipeline
// indexes (a handful of chunks) a scan beats any approximate structure.

use serde::{Deserialize, Serialize};

/// A chunk with its embedding, as stored in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    /// Position of this chunk in the split output
    pub chunk_index: usize,
    /// Character offset in the compiled corpus text
    pub start_index: usize,
    pub content: String,
    pub embedding: Vec<f64>,
}

/// A single retrieval result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub chunk_index: usize,
    pub start_index: usize,
    pub content: String,
    /// Cosine similarity to the query, 0.0 to 1.0
    pub score: f64,
}

/// An opaque similarity-search structure over chunk embeddings.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    entries: Vec<IndexedChunk>,
}

impl VectorIndex {
    pub fn new(entries: Vec<IndexedChunk>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexedChunk] {
        &self.entries
    }

    /// The `top_k` entries most similar to the query vector, highest
    /// similarity first.
    pub fn search(&self, query: &[f64], top_k: usize) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                chunk_index: entry.chunk_index,
                start_index: entry.start_index,
                content: entry.content.clone(),
                score: cosine_similarity(query, &entry.embedding),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        hits
    }
}

/// Cosine similarity between two embedding vectors.
///
/// Returns 0.0 to 1.0. Mismatched dimensions and zero vectors score 0.0
/// rather than erroring — a degenerate vector should never outrank a
/// real match.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}
