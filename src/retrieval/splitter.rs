// Character-based text splitting with overlap.
//
// Chunks are fixed-size windows over the compiled corpus text, measured
// in characters. Each window after the first starts `chunk_overlap`
// characters before the previous window's end, so neighboring chunks
// share context across the boundary.

use serde::{Deserialize, Serialize};

/// A bounded-length segment of the compiled corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    /// Character offset of this chunk's first character in the source text.
    pub start_index: usize,
}

/// Splits text into fixed-size overlapping character windows.
#[derive(Debug, Clone, Copy)]
pub struct CharacterSplitter {
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// How many characters consecutive chunks share
    pub chunk_overlap: usize,
}

impl Default for CharacterSplitter {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl CharacterSplitter {
    /// Split `text` into chunks, recording each chunk's start offset.
    ///
    /// Text no longer than `chunk_size` yields exactly one chunk; empty
    /// text yields none. Every chunk is at most `chunk_size` characters.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        // Guard against a degenerate overlap that would never advance
        let step = self.chunk_size.saturating_sub(self.chunk_overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(Chunk {
                content: chars[start..end].iter().collect(),
                start_index: start,
            });
            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}
