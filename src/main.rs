use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lingo::export;
use lingo::knowledge::KnowledgeStore;
use lingo::library::{list_documents, list_languages};
use lingo::locale::UiLanguage;
use lingo::romanize::HANZI;
use lingo::{App, Config};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lingo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory with one subdirectory per study language
    #[arg(long, global = true)]
    languages: Option<PathBuf>,

    /// Directory of documents to study
    #[arg(long, global = true)]
    texts: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the study languages found
    Languages,
    /// List the documents found
    Texts,
    /// Export the dictionary of a language
    Export {
        /// Language identifier (its directory name)
        language: String,
        /// Include romanized readings
        #[arg(long)]
        alt: bool,
    },
}

/// Send logs to the log file; the terminal belongs to the interface
fn init_logging() {
    let writer = Config::log_path()
        .and_then(|path| {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            File::options()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {:?}", path))
        })
        .map(|file| BoxMakeWriter::new(Arc::new(file)))
        .unwrap_or_else(|_| BoxMakeWriter::new(std::io::sink));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lingo=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("{:#}; using defaults", e);
        Config::default()
    });
    if let Some(languages) = cli.languages {
        config.languages_dir = languages;
    }
    if let Some(texts) = cli.texts {
        config.texts_dir = texts;
    }

    match cli.command {
        Some(Commands::Languages) => {
            for language in list_languages(&config.languages_dir) {
                println!("{}", language);
            }
        }
        Some(Commands::Texts) => {
            for document in list_documents(&config.texts_dir) {
                println!("{}", document.name);
            }
        }
        Some(Commands::Export { language, alt }) => {
            let ui = UiLanguage::load(&config.interface_language_file);
            let store = KnowledgeStore::load(&config.languages_dir, &language);
            let path = if alt {
                export::export_alt_dictionary(
                    store.levels(),
                    &language,
                    ui,
                    &config.languages_dir,
                    &HANZI,
                )?
            } else {
                export::export_dictionary(store.levels(), &language, ui, &config.languages_dir)?
            };
            println!("{}", path.display());
        }
        None => {
            // Launch TUI
            let mut app = App::new(config)?;
            app.run().await?;
        }
    }

    Ok(())
}
