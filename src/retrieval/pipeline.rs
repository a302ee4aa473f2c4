// Retrieval pipeline — split, embed, index, and query.
//
// Ties the splitter, the embedding provider, and the vector index
// together. Only the first two chunks of the corpus are embedded and
// indexed; retrieval never sees content beyond them, however large the
// corpus. Queries against the index therefore answer from the corpus's
// opening chunks only.

use anyhow::Result;
use tracing::info;

use super::embedder::Embedder;
use super::index::{IndexedChunk, SearchHit, VectorIndex};
use super::splitter::CharacterSplitter;

/// How many chunks of the split corpus are embedded and indexed.
pub const INDEXED_CHUNK_LIMIT: usize = 2;

/// Default number of hits returned per query.
pub const DEFAULT_TOP_K: usize = 6;

/// Outcome of building an index: the index itself plus split statistics.
#[derive(Debug)]
pub struct BuiltIndex {
    pub index: VectorIndex,
    /// Total chunks the splitter produced, indexed or not
    pub total_chunks: usize,
}

/// Split the corpus text and embed the first [`INDEXED_CHUNK_LIMIT`]
/// chunks into a searchable index.
pub async fn build_index(corpus_text: &str, embedder: &dyn Embedder) -> Result<BuiltIndex> {
    let splitter = CharacterSplitter::default();
    let chunks = splitter.split(corpus_text);
    if chunks.is_empty() {
        anyhow::bail!("Compiled corpus is empty — nothing to index");
    }

    let indexed = &chunks[..chunks.len().min(INDEXED_CHUNK_LIMIT)];
    info!(
        total_chunks = chunks.len(),
        indexed_chunks = indexed.len(),
        "Embedding corpus chunks"
    );

    let texts: Vec<String> = indexed.iter().map(|c| c.content.clone()).collect();
    let vectors = embedder.embed_batch(&texts).await?;

    let entries = indexed
        .iter()
        .zip(vectors)
        .enumerate()
        .map(|(chunk_index, (chunk, embedding))| IndexedChunk {
            chunk_index,
            start_index: chunk.start_index,
            content: chunk.content.clone(),
            embedding,
        })
        .collect();

    Ok(BuiltIndex {
        index: VectorIndex::new(entries),
        total_chunks: chunks.len(),
    })
}

/// Embed the query string and return the `top_k` most similar chunks.
pub async fn search_index(
    index: &VectorIndex,
    embedder: &dyn Embedder,
    query: &str,
    top_k: usize,
) -> Result<Vec<SearchHit>> {
    let query_vector = embedder.embed_one(query).await?;
    Ok(index.search(&query_vector, top_k))
}
