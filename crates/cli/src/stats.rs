use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Counters shared by every document task of one run.
pub struct RunStats {
    started: Instant,

    documents_discovered: AtomicUsize,
    documents_processed: AtomicUsize,
    documents_skipped: AtomicUsize,
    documents_failed: AtomicUsize,
    relations_emitted: AtomicUsize,

    // microseconds
    total_document_time_us: AtomicU64,
}

impl RunStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Instant::now(),
            documents_discovered: AtomicUsize::new(0),
            documents_processed: AtomicUsize::new(0),
            documents_skipped: AtomicUsize::new(0),
            documents_failed: AtomicUsize::new(0),
            relations_emitted: AtomicUsize::new(0),
            total_document_time_us: AtomicU64::new(0),
        })
    }

    pub fn record_discovered(&self, count: usize) {
        self.documents_discovered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_processed(&self, duration: Duration, relations: usize) {
        self.documents_processed.fetch_add(1, Ordering::Relaxed);
        self.relations_emitted.fetch_add(relations, Ordering::Relaxed);
        self.total_document_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.documents_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.documents_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RunSummary {
        let processed = self.documents_processed.load(Ordering::Relaxed);
        let total_us = self.total_document_time_us.load(Ordering::Relaxed) as f64;
        RunSummary {
            documents_discovered: self.documents_discovered.load(Ordering::Relaxed),
            documents_processed: processed,
            documents_skipped: self.documents_skipped.load(Ordering::Relaxed),
            documents_failed: self.documents_failed.load(Ordering::Relaxed),
            relations_emitted: self.relations_emitted.load(Ordering::Relaxed),
            avg_document_time_ms: if processed > 0 {
                total_us / processed as f64 / 1000.0
            } else {
                0.0
            },
            elapsed_ms: self.started.elapsed().as_millis() as u64,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub documents_discovered: usize,
    pub documents_processed: usize,
    pub documents_skipped: usize,
    pub documents_failed: usize,
    pub relations_emitted: usize,
    pub avg_document_time_ms: f64,
    pub elapsed_ms: u64,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
