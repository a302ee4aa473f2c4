// Lexical database — hyponym lookup over a local WordNet installation.
//
// The whole database is loaded into memory up front: the four index files
// map lemmas to synset offsets, the four data files hold the synsets and
// their relation pointers. Lookups then never touch the filesystem.

mod wndb;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use wndb::RawSynset;

/// Pointer symbol marking a hyponym relation in the data files.
const HYPONYM_POINTER: &str = "~";

/// The four parts of speech WordNet ships database files for, in the
/// order senses are reported.
const PARTS_OF_SPEECH: [&str; 4] = ["noun", "verb", "adj", "adv"];

/// Per-part-of-speech lemma index and synset table.
#[derive(Debug)]
struct PosDatabase {
    index: HashMap<String, Vec<u64>>,
    synsets: HashMap<u64, RawSynset>,
}

/// An in-memory WordNet database.
#[derive(Debug)]
pub struct Lexicon {
    parts: Vec<PosDatabase>,
}

impl Lexicon {
    /// Load the WordNet database files from `dir`.
    ///
    /// Expects `index.<pos>` and `data.<pos>` for noun, verb, adj, and adv.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!(
                "WordNet database directory {} does not exist.\n\
                 Point GAZETTE_WORDNET_DIR at an extracted WNdb distribution.",
                dir.display()
            );
        }

        let mut parts = Vec::with_capacity(PARTS_OF_SPEECH.len());
        for pos in PARTS_OF_SPEECH {
            parts.push(load_pos(dir, pos)?);
        }

        let lemmas: usize = parts.iter().map(|p| p.index.len()).sum();
        let synsets: usize = parts.iter().map(|p| p.synsets.len()).sum();
        info!(lemmas, synsets, dir = %dir.display(), "Loaded WordNet database");

        Ok(Self { parts })
    }

    /// Number of senses (synsets) the word has across all parts of speech.
    pub fn sense_count(&self, word: &str) -> usize {
        let key = normalize(word);
        self.parts
            .iter()
            .filter_map(|db| db.index.get(&key))
            .map(|offsets| offsets.len())
            .sum()
    }

    /// All hyponym lemma names for the word, flattened into one list.
    ///
    /// Walks every sense of the word in database order and every hyponym
    /// pointer of each sense. Duplicates are preserved; multi-word lemmas
    /// keep their underscores. A word with no senses yields an empty list.
    pub fn hyponyms(&self, word: &str) -> Vec<String> {
        let key = normalize(word);
        let mut lemmas = Vec::new();

        for db in &self.parts {
            let Some(offsets) = db.index.get(&key) else {
                continue;
            };
            for offset in offsets {
                let Some(synset) = db.synsets.get(offset) else {
                    continue;
                };
                for pointer in &synset.pointers {
                    if pointer.symbol != HYPONYM_POINTER {
                        continue;
                    }
                    let Some(target) = db.synsets.get(&pointer.offset) else {
                        continue;
                    };
                    lemmas.extend(target.words.iter().cloned());
                }
            }
        }

        lemmas
    }
}

/// Load one part of speech's index and data files.
fn load_pos(dir: &Path, pos: &str) -> Result<PosDatabase> {
    let index_path = dir.join(format!("index.{pos}"));
    let data_path = dir.join(format!("data.{pos}"));

    let index_raw = std::fs::read_to_string(&index_path)
        .with_context(|| format!("Failed to read {}", index_path.display()))?;
    let data_raw = std::fs::read_to_string(&data_path)
        .with_context(|| format!("Failed to read {}", data_path.display()))?;

    let mut index: HashMap<String, Vec<u64>> = HashMap::new();
    for line in index_raw.lines() {
        // License header lines start with a space
        if line.starts_with(' ') || line.is_empty() {
            continue;
        }
        let entry = wndb::parse_index_line(line)
            .with_context(|| format!("Malformed line in {}", index_path.display()))?;
        index.insert(entry.lemma, entry.offsets);
    }

    let mut synsets: HashMap<u64, RawSynset> = HashMap::new();
    for line in data_raw.lines() {
        if line.starts_with(' ') || line.is_empty() {
            continue;
        }
        let synset = wndb::parse_data_line(line)
            .with_context(|| format!("Malformed line in {}", data_path.display()))?;
        synsets.insert(synset.offset, synset);
    }

    debug!(pos, lemmas = index.len(), synsets = synsets.len(), "Loaded part of speech");

    Ok(PosDatabase { index, synsets })
}

/// Index lemmas are lowercase with underscores for spaces.
fn normalize(word: &str) -> String {
    word.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Write a minimal WNdb fixture: dogs under animal, plus a two-lemma
    /// hyponym synset, with empty databases for the other parts of speech.
    fn fixture_dir() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let header = "  1 license header line\n";

        std::fs::write(
            dir.path().join("index.noun"),
            format!(
                "{header}animal n 1 1 ~ 1 0 00015388\n\
                 dog n 1 2 @ ~ 1 1 02084071\n\
                 golden_retriever n 1 1 @ 1 0 02085272\n"
            ),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("data.noun"),
            format!(
                "{header}\
                 00015388 05 n 01 animal 0 001 ~ 02084071 n 0000 | a living organism\n\
                 02084071 05 n 01 dog 0 002 @ 00015388 n 0000 ~ 02085272 n 0000 | a domesticated canid\n\
                 02085272 05 n 02 golden_retriever 0 goldie 1 000 | a retriever breed\n"
            ),
        )
        .unwrap();

        for pos in ["verb", "adj", "adv"] {
            std::fs::write(dir.path().join(format!("index.{pos}")), header).unwrap();
            std::fs::write(dir.path().join(format!("data.{pos}")), header).unwrap();
        }

        let path = dir.path().to_path_buf();
        (dir, path)
    }

    #[test]
    fn test_hyponyms_flattens_lemma_names() {
        let (_guard, path) = fixture_dir();
        let lexicon = Lexicon::load(&path).unwrap();

        assert_eq!(lexicon.hyponyms("animal"), vec!["dog".to_string()]);
        assert_eq!(
            lexicon.hyponyms("dog"),
            vec!["golden_retriever".to_string(), "goldie".to_string()]
        );
    }

    #[test]
    fn test_hyponyms_unknown_word_is_empty() {
        let (_guard, path) = fixture_dir();
        let lexicon = Lexicon::load(&path).unwrap();
        assert!(lexicon.hyponyms("unicorn").is_empty());
        assert_eq!(lexicon.sense_count("unicorn"), 0);
    }

    #[test]
    fn test_lookup_normalizes_case_and_spaces() {
        let (_guard, path) = fixture_dir();
        let lexicon = Lexicon::load(&path).unwrap();
        assert_eq!(lexicon.hyponyms("Animal"), vec!["dog".to_string()]);
        assert_eq!(lexicon.sense_count("DOG"), 1);
    }

    #[test]
    fn test_load_missing_dir_errors() {
        let err = Lexicon::load(Path::new("/nonexistent/wordnet")).unwrap_err();
        assert!(
            err.to_string().contains("GAZETTE_WORDNET_DIR"),
            "Unexpected error: {err}"
        );
    }

    #[test]
    fn test_leaf_synset_has_no_hyponyms() {
        let (_guard, path) = fixture_dir();
        let lexicon = Lexicon::load(&path).unwrap();
        assert_eq!(lexicon.sense_count("golden retriever"), 1);
        assert!(lexicon.hyponyms("golden retriever").is_empty());
    }
}
