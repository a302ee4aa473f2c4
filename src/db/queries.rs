// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust
// interfaces.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::IndexMeta;
use crate::retrieval::index::{IndexedChunk, VectorIndex};

/// Replace the stored retrieval index with a freshly built one.
///
/// The old rows are dropped first — the index always reflects exactly one
/// compile-and-embed run.
pub fn replace_index(
    conn: &mut Connection,
    source: &str,
    model: &str,
    total_chunks: usize,
    index: &VectorIndex,
) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute("DELETE FROM index_chunks", [])?;
    tx.execute("DELETE FROM index_meta", [])?;

    for entry in index.entries() {
        let embedding_json = serde_json::to_string(&entry.embedding)?;
        tx.execute(
            "INSERT INTO index_chunks (chunk_index, start_index, content, embedding)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.chunk_index as i64,
                entry.start_index as i64,
                entry.content,
                embedding_json
            ],
        )?;
    }

    tx.execute(
        "INSERT INTO index_meta (id, source, model, total_chunks, indexed_chunks)
         VALUES (1, ?1, ?2, ?3, ?4)",
        params![source, model, total_chunks as i64, index.len() as i64],
    )?;

    tx.commit()?;
    Ok(())
}

/// Load the stored index metadata, if an index has been built.
pub fn get_index_meta(conn: &Connection) -> Result<Option<IndexMeta>> {
    let mut stmt = conn.prepare(
        "SELECT source, model, total_chunks, indexed_chunks, created_at
         FROM index_meta WHERE id = 1",
    )?;
    let result = stmt
        .query_row([], |row| {
            Ok(IndexMeta {
                source: row.get(0)?,
                model: row.get(1)?,
                total_chunks: row.get::<_, i64>(2)? as usize,
                indexed_chunks: row.get::<_, i64>(3)? as usize,
                created_at: row.get(4)?,
            })
        })
        .optional()?;
    Ok(result)
}

/// Load the stored chunks into a searchable in-memory index.
pub fn load_index(conn: &Connection) -> Result<VectorIndex> {
    let mut stmt = conn.prepare(
        "SELECT chunk_index, start_index, content, embedding
         FROM index_chunks ORDER BY chunk_index",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (chunk_index, start_index, content, embedding_json) = row?;
        let embedding: Vec<f64> = serde_json::from_str(&embedding_json)?;
        entries.push(IndexedChunk {
            chunk_index: chunk_index as usize,
            start_index: start_index as usize,
            content,
            embedding,
        });
    }

    Ok(VectorIndex::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    fn test_index() -> VectorIndex {
        VectorIndex::new(vec![
            IndexedChunk {
                chunk_index: 0,
                start_index: 0,
                content: "first chunk".to_string(),
                embedding: vec![0.1, 0.2, 0.3],
            },
            IndexedChunk {
                chunk_index: 1,
                start_index: 800,
                content: "second chunk".to_string(),
                embedding: vec![0.4, 0.5, 0.6],
            },
        ])
    }

    #[test]
    fn test_index_round_trips_through_sqlite() {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();

        replace_index(&mut conn, "articles.json", "test-model", 9, &test_index()).unwrap();

        let loaded = load_index(&conn).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.entries()[0].content, "first chunk");
        assert_eq!(loaded.entries()[1].start_index, 800);
        assert_eq!(loaded.entries()[1].embedding, vec![0.4, 0.5, 0.6]);

        let meta = get_index_meta(&conn).unwrap().unwrap();
        assert_eq!(meta.source, "articles.json");
        assert_eq!(meta.total_chunks, 9);
        assert_eq!(meta.indexed_chunks, 2);
    }

    #[test]
    fn test_replace_index_drops_old_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();

        replace_index(&mut conn, "old.json", "test-model", 9, &test_index()).unwrap();

        let one_chunk = VectorIndex::new(vec![IndexedChunk {
            chunk_index: 0,
            start_index: 0,
            content: "replacement".to_string(),
            embedding: vec![1.0],
        }]);
        replace_index(&mut conn, "new.json", "test-model", 1, &one_chunk).unwrap();

        let loaded = load_index(&conn).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0].content, "replacement");

        let meta = get_index_meta(&conn).unwrap().unwrap();
        assert_eq!(meta.source, "new.json");
    }

    #[test]
    fn test_meta_absent_before_first_index() {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        assert!(get_index_meta(&conn).unwrap().is_none());
        assert!(load_index(&conn).unwrap().is_empty());
    }
}
