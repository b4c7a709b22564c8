//! Prospector CLI - Command-line interface
//!
//! Usage:
//!   prospector extract --file article.txt --format csv --output leads.csv
//!   prospector extract --text "..." --entities spans.json
//!   prospector check-name "Dr. Jane Goodall"

mod export;
mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::AsyncReadExt;

use prospector_core::{
    sort_by_confidence, EntityRecognizer, LoggingConfig, ProspectorConfig, WindowStrategy,
};
use prospector_extractor::{
    validate_name, Deduplicator, HeuristicRecognizer, PrecomputedRecognizer, ProfileAssembler,
};

use crate::summary::ProfileSummary;

#[derive(Parser)]
#[command(name = "prospector")]
#[command(about = "Extract professional profiles from unstructured text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract profiles from a document
    Extract(ExtractArgs),
    /// Validate a single name and print its canonical form
    CheckName {
        /// Name to check
        name: String,
    },
}

#[derive(clap::Args, Debug)]
struct ExtractArgs {
    /// Read the document from a file
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Document text (stdin is read when neither --file nor --text is given)
    #[arg(long)]
    text: Option<String>,

    /// JSON entity spans from an external recognizer
    #[arg(long)]
    entities: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Sort profiles by descending confidence
    #[arg(long)]
    sort_confidence: bool,

    /// Emit repeated (name, company) pairs
    #[arg(long)]
    no_dedup: bool,

    /// Minimum confidence in [0, 1]
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Characters of context on each side of a mention
    #[arg(long, conflicts_with = "window_sentences")]
    window_chars: Option<usize>,

    /// Sentences of context on each side of a mention
    #[arg(long)]
    window_sentences: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => {
            let config = build_config(&args)?;
            init_tracing(&config.logging);
            run_extract(args, config).await?;
        }
        Commands::CheckName { name } => match validate_name(&name) {
            Ok(canonical) => println!("{}", canonical),
            Err(reason) => println!("rejected: {}", reason),
        },
    }

    Ok(())
}

/// File or environment configuration with command-line overrides applied
fn build_config(args: &ExtractArgs) -> anyhow::Result<ProspectorConfig> {
    let mut config = match &args.config {
        Some(path) => ProspectorConfig::from_file(path)?.with_env_override()?,
        None => ProspectorConfig::from_env()?,
    };

    let extraction = &mut config.extraction;
    if let Some(min_confidence) = args.min_confidence {
        extraction.min_confidence = min_confidence;
    }
    if let Some(chars) = args.window_chars {
        extraction.window = WindowStrategy::Chars(chars);
    }
    if let Some(sentences) = args.window_sentences {
        extraction.window = WindowStrategy::Sentences(sentences);
    }
    if args.no_dedup {
        extraction.dedup_enabled = false;
    }

    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "prospector={0},prospector_core={0},prospector_extractor={0}",
            logging.level
        )
        .into()
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn read_document(args: &ExtractArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read {}", path.display()));
    }

    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("cannot read stdin")?;
    Ok(text)
}

fn load_recognizer(args: &ExtractArgs) -> anyhow::Result<Arc<dyn EntityRecognizer>> {
    match &args.entities {
        Some(path) => {
            let recognizer = PrecomputedRecognizer::from_file(path)?;
            tracing::info!("Loaded {} entity spans from {}", recognizer.len(), path.display());
            Ok(Arc::new(recognizer))
        }
        None => Ok(Arc::new(HeuristicRecognizer::new())),
    }
}

async fn run_extract(args: ExtractArgs, config: ProspectorConfig) -> anyhow::Result<()> {
    let text = read_document(&args).await?;
    let recognizer = load_recognizer(&args)?;

    let assembler = ProfileAssembler::new(recognizer, config.extraction);
    let active = assembler.config();
    tracing::debug!(
        "Extracting with window {:?}, min confidence {:.2}, dedup {}",
        active.window,
        active.min_confidence,
        active.dedup_enabled
    );
    let mut dedup = Deduplicator::new();
    let extraction = assembler.assemble(&text, &mut dedup)?;

    let mut profiles = extraction.profiles;
    if args.sort_confidence {
        sort_by_confidence(&mut profiles);
    }
    let summary = ProfileSummary::from_profiles(&profiles);

    let rendered = match args.format {
        OutputFormat::Table => format!("{}\n{}", export::to_table(&profiles), summary),
        OutputFormat::Csv => export::to_csv(&profiles)?,
        OutputFormat::Json => export::to_json(&profiles, &summary)?,
    };

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("Wrote {} profiles to {}", profiles.len(), path.display());
            if args.format != OutputFormat::Table {
                println!("{}", summary);
            }
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
