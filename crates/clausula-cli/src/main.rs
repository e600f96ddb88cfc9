//! clausula - classify contracts and extract their key fields.
//!
//! # Configuration
//!
//! Settings come from an optional `--config` file (TOML, JSON or YAML),
//! then from `CLAUSULA_*` environment variables, which may also be set in
//! a `.env` file. Logs go to stderr; results are printed to stdout as JSON.
//!
//! ```bash
//! clausula process contrato.pdf
//! clausula classify scan.png --type png
//! clausula batch uploads/*.pdf --workers 4
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clausula_core::{
    ClausulaConfig, ContractType, DocumentProcessor, JobState, ProcessingQueue, QueueConfig,
    RawDocument, StructuredData,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Contract document classification and field extraction.
#[derive(Parser, Debug)]
#[command(name = "clausula", version, about)]
struct Cli {
    /// Configuration file (.toml, .json or .yaml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract text, classify and pull structured fields from one file.
    Process {
        file: PathBuf,
        /// Declared file type; defaults to the file extension.
        #[arg(short = 't', long = "type")]
        file_type: Option<String>,
        /// Include the extracted text in the output.
        #[arg(long)]
        with_text: bool,
    },
    /// Show per-category keyword scores for one file.
    Classify {
        file: PathBuf,
        /// Declared file type; defaults to the file extension.
        #[arg(short = 't', long = "type")]
        file_type: Option<String>,
    },
    /// Process several files through the background queue.
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Number of workers; overrides configuration.
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Print the active keyword table.
    Keywords,
}

#[derive(Serialize)]
struct ProcessOutput<'a> {
    file: &'a Path,
    contract_type: ContractType,
    structured_data: &'a StructuredData,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Process {
            file,
            file_type,
            with_text,
        } => {
            let processor = DocumentProcessor::from_config(&config)?;
            let document = raw_document(file, file_type);
            let processed = processor.process_document(&document);
            let output = ProcessOutput {
                file: &document.file_path,
                contract_type: processed.contract_type,
                structured_data: &processed.structured_data,
                text: with_text.then_some(processed.text.as_str()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Classify { file, file_type } => {
            let processor = DocumentProcessor::from_config(&config)?;
            let document = raw_document(file, file_type);
            let text = processor
                .extraction()
                .extract_text(&document.file_path, &document.declared_file_type);
            let classifier = processor.classifier();
            let output = serde_json::json!({
                "file": document.file_path,
                "scores": classifier.scores(&text),
                "contract_type": classifier.classify(&text),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Batch { files, workers } => {
            let mut config = config;
            config.queue = batch_queue_config(&config.queue, files.len(), workers);
            run_batch(&config, files).await?;
        }
        Commands::Keywords => {
            let table = config.classifier.table()?;
            println!("{}", serde_json::to_string_pretty(table.entries())?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ClausulaConfig> {
    let mut config = match path {
        Some(path) => ClausulaConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClausulaConfig::default(),
    };
    config.apply_env();
    config.validate()?;
    tracing::debug!(
        config_file = ?path,
        ocr_language = %config.ocr.language,
        workers = config.queue.workers,
        custom_rules = config.fields.custom_rules.len(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Queue settings for a batch: every submitted job must still be
/// retained when its record is printed.
fn batch_queue_config(base: &QueueConfig, jobs: usize, workers: Option<usize>) -> QueueConfig {
    QueueConfig {
        workers: workers.unwrap_or(base.workers),
        retain_completed: base.retain_completed.max(jobs),
        ..base.clone()
    }
}

fn raw_document(file: PathBuf, file_type: Option<String>) -> RawDocument {
    match file_type {
        Some(file_type) => RawDocument::new(file, file_type),
        None => RawDocument::from_path(file),
    }
}

async fn run_batch(config: &ClausulaConfig, files: Vec<PathBuf>) -> Result<()> {
    let processor = Arc::new(DocumentProcessor::from_config(config)?);
    let queue = ProcessingQueue::start(processor, config.queue.clone())?;

    tracing::info!(files = files.len(), "Submitting batch");
    let mut ids = Vec::with_capacity(files.len());
    for file in files {
        ids.push(queue.submit(RawDocument::from_path(file)).await?);
    }
    for id in ids {
        let record = queue.wait(id).await?;
        println!("{}", serde_json::to_string(&record)?);
    }

    let stats = queue.stats().await;
    queue.shutdown().await?;
    tracing::info!(
        total = stats.total,
        succeeded = stats.count(JobState::Succeeded),
        failed = stats.count(JobState::Failed),
        "Batch finished"
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
