use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use gazette::analysis::{frequency, keywords};
use gazette::config::Config;
use gazette::corpus::Corpus;
use gazette::db;
use gazette::lexicon::Lexicon;
use gazette::output::terminal;
use gazette::retrieval::embedder::OpenAiEmbedder;
use gazette::retrieval::pipeline;

/// Gazette: lexical statistics and retrieval over extracted news corpora.
///
/// Compiles extracted article JSON into one corpus text, analyzes word
/// frequencies, looks up hyponyms, and answers similarity queries over
/// embedded corpus chunks.
#[derive(Parser)]
#[command(name = "gazette", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Compile an article file into one corpus text and show statistics
    Compile {
        /// Article JSON file (or a raw dump, which is extracted first)
        file: PathBuf,
    },

    /// List words that occur exactly N times in the compiled corpus
    Frequency {
        /// Article JSON file (or a raw dump, which is extracted first)
        file: PathBuf,

        /// The exact occurrence count to match
        #[arg(long, default_value = "20")]
        count: usize,
    },

    /// Rank corpus keywords by TF-IDF score
    Keywords {
        /// Article JSON file (or a raw dump, which is extracted first)
        file: PathBuf,

        /// How many keywords to show
        #[arg(long, default_value = "25")]
        top: usize,
    },

    /// Look up hyponyms (more specific terms) for a word
    Hyponyms {
        /// The word to look up (e.g. "bird")
        word: String,
    },

    /// Chunk and embed a corpus, persisting the retrieval index
    Index {
        /// Article JSON file (or a raw dump, which is extracted first)
        file: PathBuf,
    },

    /// Retrieve the indexed chunks most similar to a query
    Query {
        /// The query text
        text: String,

        /// How many matches to return
        #[arg(long, default_value = "6")]
        top_k: usize,
    },

    /// Show system status (index age, DB stats, configuration)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gazette=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Gazette database...");
            let config = Config::load()?;
            let conn = db::initialize(&config.db_path)?;
            let table_count = db::schema::table_count(&conn)?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nGazette is ready. Next step: set up your .env file");
            println!("  (see .env.example for required variables)");
            println!("\nThen run: cargo run -- index <articles.json>");
        }

        Commands::Compile { file } => {
            let config = Config::load()?;
            let corpus = Corpus::open(&file, &config)?;
            let compiled = corpus.compile()?;
            terminal::display_compile_stats(&compiled, &corpus.file_path().display().to_string());
        }

        Commands::Frequency { file, count } => {
            let config = Config::load()?;
            let corpus = Corpus::open(&file, &config)?;
            let compiled = corpus.compile()?;

            let words = frequency::words_at_frequency(&compiled.text, count)?;
            terminal::display_words(
                &format!("Words occurring exactly {count} times"),
                &words,
            );
        }

        Commands::Keywords { file, top } => {
            let config = Config::load()?;
            let corpus = Corpus::open(&file, &config)?;
            let articles = corpus.load()?;

            let bodies: Vec<String> = articles.into_iter().map(|a| a.fulltext).collect();
            let ranked = keywords::ranked_keywords(&bodies, top)?;
            terminal::display_keywords(&ranked);
        }

        Commands::Hyponyms { word } => {
            let config = Config::load()?;
            config.require_wordnet()?;

            let lexicon = Lexicon::load(&config.wordnet_dir)?;
            let senses = lexicon.sense_count(&word);
            if senses == 0 {
                println!("No senses found for {word:?}.");
                return Ok(());
            }

            let hyponyms = lexicon.hyponyms(&word);
            println!("{word:?} has {senses} senses");
            terminal::display_words(&format!("Hyponyms of {word:?}"), &hyponyms);
        }

        Commands::Index { file } => {
            let config = Config::load()?;
            config.require_api_key()?;
            let mut conn = db::open(&config.db_path)?;

            let corpus = Corpus::open(&file, &config)?;
            println!("Compiling corpus from {}...", corpus.file_path().display());
            let compiled = corpus.compile()?;
            terminal::display_compile_stats(&compiled, &corpus.file_path().display().to_string());

            let embedder = OpenAiEmbedder::from_config(&config)?;

            let pb = ProgressBar::new_spinner();
            pb.set_message("Embedding chunks...");
            pb.enable_steady_tick(Duration::from_millis(120));
            let built = pipeline::build_index(&compiled.text, &embedder).await?;
            pb.finish_and_clear();

            db::queries::replace_index(
                &mut conn,
                &corpus.file_path().display().to_string(),
                &config.embedding_model,
                built.total_chunks,
                &built.index,
            )?;

            println!("\n{}", "Index built.".bold());
            println!("  Chunks produced: {}", built.total_chunks);
            println!("  Chunks indexed:  {}", built.index.len());
            if built.total_chunks > built.index.len() {
                println!(
                    "  {}",
                    format!(
                        "Note: only the first {} chunks are embedded; queries answer from the corpus opening.",
                        built.index.len()
                    )
                    .dimmed()
                );
            }
        }

        Commands::Query { text, top_k } => {
            let config = Config::load()?;
            config.require_api_key()?;
            let conn = db::open(&config.db_path)?;

            let index = db::queries::load_index(&conn)?;
            if index.is_empty() {
                anyhow::bail!("No retrieval index found. Run `gazette index <file>` first.");
            }

            let embedder = OpenAiEmbedder::from_config(&config)?;
            let hits = pipeline::search_index(&index, &embedder, &text, top_k).await?;
            terminal::display_hits(&text, &hits);
        }

        Commands::Status => {
            let config = Config::load()?;
            if !std::path::Path::new(&config.db_path).exists() {
                println!("Database: not initialized");
                println!("\nRun `gazette init` to set up the database.");
                return Ok(());
            }
            let conn = db::open(&config.db_path)?;
            gazette::status::show(&conn, &config)?;
        }
    }

    Ok(())
}
