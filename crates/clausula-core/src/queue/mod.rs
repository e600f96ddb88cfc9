//! Background processing queue.
//!
//! Documents are submitted to a bounded channel and processed by a fixed
//! pool of workers. Each pass runs on tokio's blocking pool, since text
//! extraction and OCR are synchronous. A pass that panics is retried
//! until `max_attempts` is reached; otherwise the outcome is final.
//! Jobs cannot be cancelled once submitted.

mod events;
mod job;
mod stats;
mod worker;

pub use events::{JobEvent, JobEventBus, JobSubscriber};
pub use job::{FailureReason, JobId, JobRecord, JobState};
pub use stats::QueueStats;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex, Notify, RwLock};
use tokio::task::JoinHandle;

use crate::error::{ClausulaError, ClausulaResult};
use crate::pipeline::DocumentProcessor;
use crate::types::RawDocument;
use worker::Shared;

/// Processing queue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Number of worker tasks (default: 2).
    pub workers: usize,
    /// Jobs that can wait in the channel before `submit` blocks (default: 64).
    pub capacity: usize,
    /// Attempts per job before a crashing job is failed (default: 2).
    pub max_attempts: u32,
    /// Finished jobs kept for `record`, `wait` and `stats`; the oldest are
    /// evicted past this count (default: 1024).
    pub retain_completed: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            capacity: 64,
            max_attempts: 2,
            retain_completed: 1024,
        }
    }
}

impl QueueConfig {
    pub fn validate(&self) -> ClausulaResult<()> {
        if self.workers == 0 {
            return Err(ClausulaError::configuration("queue.workers must be at least 1"));
        }
        if self.capacity == 0 {
            return Err(ClausulaError::configuration("queue.capacity must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(ClausulaError::configuration(
                "queue.max_attempts must be at least 1",
            ));
        }
        if self.retain_completed == 0 {
            return Err(ClausulaError::configuration(
                "queue.retain_completed must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Worker pool processing documents in the background.
pub struct ProcessingQueue {
    shared: Arc<Shared>,
    sender: Mutex<Option<mpsc::Sender<JobId>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl ProcessingQueue {
    /// Spawn the workers. Must be called from within a tokio runtime.
    pub fn start(processor: Arc<DocumentProcessor>, config: QueueConfig) -> ClausulaResult<Self> {
        config.validate()?;

        let (sender, receiver) = mpsc::channel(config.capacity);
        let receiver = Arc::new(Mutex::new(receiver));
        let shared = Arc::new(Shared {
            processor,
            jobs: RwLock::new(HashMap::new()),
            bus: JobEventBus::new(),
            changed: Notify::new(),
            max_attempts: config.max_attempts,
            retain_completed: config.retain_completed,
        });

        let workers = (0..config.workers)
            .map(|worker_id| {
                tokio::spawn(worker::run(
                    worker_id,
                    Arc::clone(&shared),
                    Arc::clone(&receiver),
                ))
            })
            .collect();

        tracing::info!(
            workers = config.workers,
            capacity = config.capacity,
            max_attempts = config.max_attempts,
            "Processing queue started"
        );

        Ok(Self {
            shared,
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(workers),
        })
    }

    /// Queue a document. Waits for channel space when the queue is full.
    pub async fn submit(&self, document: RawDocument) -> ClausulaResult<JobId> {
        let sender = self
            .sender
            .lock()
            .await
            .clone()
            .ok_or_else(ClausulaError::queue_closed)?;

        let record = JobRecord::new(document);
        let id = record.id;
        let event = JobEvent {
            job_id: id,
            state: record.state,
            attempts: 0,
        };
        self.shared.jobs.write().await.insert(id, record);
        self.shared.bus.emit(event);

        if sender.send(id).await.is_err() {
            self.shared.jobs.write().await.remove(&id);
            return Err(ClausulaError::queue_closed());
        }
        tracing::debug!(job_id = %id, "Job queued");
        Ok(id)
    }

    /// Snapshot of a job.
    pub async fn record(&self, id: JobId) -> ClausulaResult<JobRecord> {
        self.shared
            .jobs
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ClausulaError::not_found(id.to_string()))
    }

    pub async fn state(&self, id: JobId) -> ClausulaResult<JobState> {
        self.record(id).await.map(|r| r.state)
    }

    /// All jobs, oldest first.
    pub async fn records(&self) -> Vec<JobRecord> {
        let mut records: Vec<_> = self.shared.jobs.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    /// Wait until the job succeeds or fails.
    pub async fn wait(&self, id: JobId) -> ClausulaResult<JobRecord> {
        loop {
            let notified = self.shared.changed.notified();
            let record = self.record(id).await?;
            if record.state.is_terminal() {
                return Ok(record);
            }
            notified.await;
        }
    }

    /// Forget a finished job and return its last record.
    ///
    /// Jobs still queued or running are left alone.
    pub async fn remove(&self, id: JobId) -> ClausulaResult<JobRecord> {
        let mut jobs = self.shared.jobs.write().await;
        let state = jobs
            .get(&id)
            .map(|r| r.state)
            .ok_or_else(|| ClausulaError::not_found(id.to_string()))?;
        if !state.is_terminal() {
            return Err(ClausulaError::job_active(id.to_string()));
        }
        let record = jobs
            .remove(&id)
            .ok_or_else(|| ClausulaError::not_found(id.to_string()))?;
        tracing::debug!(job_id = %id, "Job removed");
        Ok(record)
    }

    /// Subscribe to job state changes.
    pub fn subscribe(&self) -> JobSubscriber {
        self.shared.bus.subscribe()
    }

    pub async fn stats(&self) -> QueueStats {
        QueueStats::from_records(self.shared.jobs.read().await.values())
    }

    /// Stop accepting jobs, let workers drain the channel, and join them.
    pub async fn shutdown(&self) -> ClausulaResult<()> {
        self.sender.lock().await.take();
        let handles: Vec<_> = self.workers.lock().await.drain(..).collect();

        let mut lost = 0;
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Queue worker terminated abnormally");
                lost += 1;
            }
        }
        tracing::info!("Processing queue stopped");

        if lost > 0 {
            return Err(ClausulaError::worker_lost(format!(
                "{} worker(s) terminated abnormally",
                lost
            )));
        }
        Ok(())
    }
}
