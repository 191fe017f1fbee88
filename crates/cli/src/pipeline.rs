use crate::config::AppConfig;
use crate::stats::{RunStats, TimedOperation};
use anyhow::{Context, Result};
use ingest::{DocumentParts, FrameReader, discover_documents, output_path, write_output};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

enum Outcome {
    Written { relations: usize },
    Skipped,
}

/// Discover every document under the input directory and convert them
/// concurrently. Per-document failures are logged and counted, never fatal.
pub async fn run(config: Arc<AppConfig>, stats: Arc<RunStats>) -> Result<()> {
    let discovery = discover_documents(&config.input_dir, config.discovery.recursive)
        .context("Failed to discover frame documents")?;
    let documents = discovery.documents;
    stats.record_discovered(documents.len() + discovery.duplicates);
    for _ in 0..discovery.duplicates {
        stats.record_skipped();
    }
    info!(
        documents = documents.len(),
        duplicates = discovery.duplicates,
        input = ?config.input_dir,
        workers = config.concurrency.max_concurrent_documents,
        "Starting conversion"
    );

    let semaphore = Arc::new(Semaphore::new(config.concurrency.max_concurrent_documents));
    let mut tasks = JoinSet::new();

    for parts in documents {
        let permit = semaphore.clone().acquire_owned().await?;
        let config = config.clone();
        let stats = stats.clone();

        tasks.spawn(async move {
            let _permit = permit;
            let timer = TimedOperation::start();
            match process_with_timeout(&parts, &config).await {
                Ok(Outcome::Written { relations }) => {
                    debug!(doc_id = %parts.doc_id, relations, "Document converted");
                    stats.record_processed(timer.elapsed(), relations);
                }
                Ok(Outcome::Skipped) => {
                    debug!(doc_id = %parts.doc_id, "Output exists, skipping");
                    stats.record_skipped();
                }
                Err(e) => {
                    warn!(doc_id = %parts.doc_id, error = %format!("{e:#}"), "Document failed");
                    stats.record_failed();
                }
            }
        });
    }

    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            warn!(error = %e, "Document task aborted");
            stats.record_failed();
        }
    }

    Ok(())
}

async fn process_with_timeout(parts: &DocumentParts, config: &AppConfig) -> Result<Outcome> {
    match config.concurrency.document_timeout_secs {
        0 => process_document(parts, config).await,
        secs => tokio::time::timeout(Duration::from_secs(secs), process_document(parts, config))
            .await
            .with_context(|| format!("Timed out after {}s", secs))?,
    }
}

async fn process_document(parts: &DocumentParts, config: &AppConfig) -> Result<Outcome> {
    let target = output_path(&config.output_dir, &parts.doc_id);
    if !config.output.overwrite && tokio::fs::try_exists(&target).await.unwrap_or(false) {
        return Ok(Outcome::Skipped);
    }

    let raw = FrameReader::load_document(parts).await?;
    let document = tokio::task::spawn_blocking(move || {
        extract::process_document(&raw.doc_id, &raw.entities, &raw.events, &raw.sentences)
    })
    .await
    .context("Transformation task failed")?;

    let relations = document.events.len();
    write_output(&config.output_dir, &document, config.output.pretty).await?;
    Ok(Outcome::Written { relations })
}
