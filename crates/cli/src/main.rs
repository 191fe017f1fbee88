//! framerel - convert entity/event/sentence frame triples into relation documents.

mod config;
mod pipeline;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use config::AppConfig;
use stats::RunStats;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "framerel")]
#[command(version, about = "Convert text-mining frame documents into flat relation documents", long_about = None)]
struct Cli {
    /// Directory containing <doc>.entities.json, <doc>.events.json and <doc>.sentences.json
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory that receives one <doc>.json per document
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of documents processed concurrently
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Only look at the top level of the input directory
    #[arg(long)]
    no_recursive: bool,

    /// Leave existing output files untouched
    #[arg(long)]
    skip_existing: bool,

    /// Write compact rather than pretty-printed JSON
    #[arg(long)]
    compact: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(input) = self.input {
            config.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(jobs) = self.jobs {
            config.concurrency.max_concurrent_documents = jobs;
        }
        if self.no_recursive {
            config.discovery.recursive = false;
        }
        if self.skip_existing {
            config.output.overwrite = false;
        }
        if self.compact {
            config.output.pretty = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.into_config().context("Invalid configuration")?;
    let stats = RunStats::new();

    pipeline::run(Arc::new(config), stats.clone()).await?;

    let summary = stats.snapshot();
    tracing::info!(
        discovered = summary.documents_discovered,
        processed = summary.documents_processed,
        skipped = summary.documents_skipped,
        failed = summary.documents_failed,
        relations = summary.relations_emitted,
        avg_document_ms = summary.avg_document_time_ms,
        elapsed_ms = summary.elapsed_ms,
        "Conversion finished"
    );

    Ok(())
}
