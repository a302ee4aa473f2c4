// System status display — shows DB stats, index age, configuration paths.

use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use rusqlite::Connection;

use crate::config::Config;
use crate::db::queries;

/// Display system status to the terminal.
pub fn show(conn: &Connection, config: &Config) -> Result<()> {
    // Database file size
    let file_size = std::fs::metadata(&config.db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", config.db_path, file_size);

    // Index status
    match queries::get_index_meta(conn)? {
        Some(meta) => {
            println!(
                "Index: {} of {} chunks from {} (built {})",
                meta.indexed_chunks, meta.total_chunks, meta.source, meta.created_at
            );
            println!("  Embedding model: {}", meta.model);
            // SQLite's datetime('now') stores UTC as "YYYY-MM-DD HH:MM:SS"
            if let Ok(built) = NaiveDateTime::parse_from_str(&meta.created_at, "%Y-%m-%d %H:%M:%S")
            {
                println!("  Age: {}", format_age(Utc::now().naive_utc() - built));
            }
        }
        None => {
            println!("Index: not yet built");
            println!("  Run `gazette index <file>` to build it");
        }
    }

    // Configuration paths
    println!("Compiled docs: {}", config.docs_path.display());
    if config.wordnet_dir.is_dir() {
        println!("WordNet: {}", config.wordnet_dir.display());
    } else {
        println!(
            "WordNet: not found at {} (set GAZETTE_WORDNET_DIR)",
            config.wordnet_dir.display()
        );
    }

    Ok(())
}

fn format_age(age: chrono::Duration) -> String {
    if age.num_days() > 0 {
        format!("{} days", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{} hours", age.num_hours())
    } else {
        format!("{} minutes", age.num_minutes().max(0))
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
