// WNdb line parsers.
//
// WordNet 3.x ships as paired plain-text files per part of speech:
// `index.<pos>` maps lemmas to synset offsets, `data.<pos>` holds one
// synset per line at those byte offsets. License header lines begin with
// a space; callers skip them before handing lines here.
//
// Index line layout:
//   lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt offset...
// Data line layout:
//   offset lex_filenum ss_type w_cnt(hex) [word lex_id]... p_cnt(dec) [ptr]... | gloss
// where each pointer is: symbol offset pos source_target.

use anyhow::{Context, Result};

/// One lemma's entry in an index file: its synset offsets, sense order.
#[derive(Debug, Clone)]
pub(crate) struct IndexEntry {
    pub lemma: String,
    pub offsets: Vec<u64>,
}

/// One synset line from a data file.
#[derive(Debug, Clone)]
pub(crate) struct RawSynset {
    pub offset: u64,
    pub words: Vec<String>,
    pub pointers: Vec<RawPointer>,
}

/// A relation pointer from one synset to another.
#[derive(Debug, Clone)]
pub(crate) struct RawPointer {
    pub symbol: String,
    pub offset: u64,
}

/// Parse a single index-file line.
pub(crate) fn parse_index_line(line: &str) -> Result<IndexEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 7 {
        anyhow::bail!("Index line too short: {line:?}");
    }

    let lemma = fields[0].to_string();
    let synset_cnt: usize = fields[2]
        .parse()
        .with_context(|| format!("Bad synset count in index line: {line:?}"))?;

    if fields.len() < synset_cnt {
        anyhow::bail!("Index line claims {synset_cnt} synsets but is too short: {line:?}");
    }

    // The synset offsets are always the last synset_cnt fields.
    let offsets = fields[fields.len() - synset_cnt..]
        .iter()
        .map(|f| {
            f.parse::<u64>()
                .with_context(|| format!("Bad synset offset {f:?} in index line"))
        })
        .collect::<Result<Vec<u64>>>()?;

    Ok(IndexEntry { lemma, offsets })
}

/// Parse a single data-file line.
pub(crate) fn parse_data_line(line: &str) -> Result<RawSynset> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        anyhow::bail!("Data line too short: {line:?}");
    }

    let offset: u64 = fields[0]
        .parse()
        .with_context(|| format!("Bad synset offset in data line: {line:?}"))?;

    let w_cnt = usize::from_str_radix(fields[3], 16)
        .with_context(|| format!("Bad word count in data line: {line:?}"))?;

    let mut words = Vec::with_capacity(w_cnt);
    for i in 0..w_cnt {
        let word = fields
            .get(4 + 2 * i)
            .with_context(|| format!("Data line ends inside word list: {line:?}"))?;
        words.push(strip_adjective_marker(word).to_string());
    }

    let p_cnt_idx = 4 + 2 * w_cnt;
    let p_cnt: usize = fields
        .get(p_cnt_idx)
        .with_context(|| format!("Data line missing pointer count: {line:?}"))?
        .parse()
        .with_context(|| format!("Bad pointer count in data line: {line:?}"))?;

    let mut pointers = Vec::with_capacity(p_cnt);
    for j in 0..p_cnt {
        let base = p_cnt_idx + 1 + 4 * j;
        let symbol = fields
            .get(base)
            .with_context(|| format!("Data line ends inside pointer list: {line:?}"))?;
        let target: u64 = fields
            .get(base + 1)
            .with_context(|| format!("Pointer missing target offset: {line:?}"))?
            .parse()
            .with_context(|| format!("Bad pointer offset in data line: {line:?}"))?;
        pointers.push(RawPointer {
            symbol: symbol.to_string(),
            offset: target,
        });
    }

    Ok(RawSynset {
        offset,
        words,
        pointers,
    })
}

/// Drop the syntactic marker adjective lemmas carry, e.g. "alone(p)".
fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(idx) => &word[..idx],
        None => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index_line_takes_trailing_offsets() {
        let entry =
            parse_index_line("dog n 2 3 @ ~ #m 2 1 02084071 10114209").unwrap();
        assert_eq!(entry.lemma, "dog");
        assert_eq!(entry.offsets, vec![2084071, 10114209]);
    }

    #[test]
    fn test_parse_index_line_no_pointer_symbols() {
        let entry = parse_index_line("animal n 1 0 1 0 00015388").unwrap();
        assert_eq!(entry.offsets, vec![15388]);
    }

    #[test]
    fn test_parse_data_line_words_and_pointers() {
        let synset = parse_data_line(
            "02084071 05 n 03 dog 0 domestic_dog 0 canis_familiaris 0 \
             002 @ 02083346 n 0000 ~ 01322604 n 0000 | a domesticated canid",
        )
        .unwrap();
        assert_eq!(synset.offset, 2084071);
        assert_eq!(
            synset.words,
            vec!["dog", "domestic_dog", "canis_familiaris"]
        );
        assert_eq!(synset.pointers.len(), 2);
        assert_eq!(synset.pointers[1].symbol, "~");
        assert_eq!(synset.pointers[1].offset, 1322604);
    }

    #[test]
    fn test_parse_data_line_strips_adjective_marker() {
        let synset =
            parse_data_line("00001740 00 a 01 alone(p) 0 000 | isolated").unwrap();
        assert_eq!(synset.words, vec!["alone"]);
    }

    #[test]
    fn test_parse_data_line_rejects_truncated_pointer_list() {
        let err = parse_data_line("02084071 05 n 01 dog 0 002 ~ 01322604 n 0000").unwrap_err();
        assert!(err.to_string().contains("pointer"), "Unexpected error: {err}");
    }
}
