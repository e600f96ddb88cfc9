//! Worker tasks draining the job channel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex, Notify, RwLock};

use super::events::{JobEvent, JobEventBus};
use super::job::{JobId, JobRecord};
use crate::pipeline::DocumentProcessor;

/// State shared by the queue handle and its workers.
pub(crate) struct Shared {
    pub processor: Arc<DocumentProcessor>,
    pub jobs: RwLock<HashMap<JobId, JobRecord>>,
    pub bus: JobEventBus,
    /// Woken on every state change.
    pub changed: Notify,
    pub max_attempts: u32,
    /// Finished jobs kept before the oldest are evicted.
    pub retain_completed: usize,
}

impl Shared {
    /// Apply `f` to a job, then publish its new state.
    pub async fn update(&self, id: JobId, f: impl FnOnce(&mut JobRecord)) -> Option<JobEvent> {
        let event = {
            let mut jobs = self.jobs.write().await;
            let record = jobs.get_mut(&id)?;
            f(record);
            let event = JobEvent {
                job_id: id,
                state: record.state,
                attempts: record.attempts,
            };
            if event.state.is_terminal() {
                evict_finished(&mut jobs, self.retain_completed, id);
            }
            event
        };
        self.bus.emit(event.clone());
        self.changed.notify_waiters();
        Some(event)
    }
}

/// Drop the oldest finished records beyond `keep`, never touching `current`.
fn evict_finished(jobs: &mut HashMap<JobId, JobRecord>, keep: usize, current: JobId) {
    let mut finished: Vec<_> = jobs
        .values()
        .filter(|r| r.state.is_terminal())
        .map(|r| (r.updated_at, r.id))
        .collect();
    if finished.len() <= keep {
        return;
    }
    finished.sort();
    let excess = finished.len() - keep;
    for (_, id) in finished
        .into_iter()
        .filter(|(_, id)| *id != current)
        .take(excess)
    {
        jobs.remove(&id);
        tracing::debug!(job_id = %id, "Evicted finished job");
    }
}

pub(crate) async fn run(
    worker_id: usize,
    shared: Arc<Shared>,
    receiver: Arc<Mutex<mpsc::Receiver<JobId>>>,
) {
    tracing::debug!(worker_id, "Worker started");
    loop {
        let next = { receiver.lock().await.recv().await };
        let Some(job_id) = next else { break };
        process_job(worker_id, &shared, job_id).await;
    }
    tracing::debug!(worker_id, "Worker stopped");
}

/// Run one job to a terminal state, re-running it after a panic until
/// the attempt limit is reached.
async fn process_job(worker_id: usize, shared: &Shared, job_id: JobId) {
    let document = match shared.jobs.read().await.get(&job_id) {
        Some(record) => record.document.clone(),
        None => return,
    };

    loop {
        let Some(started) = shared.update(job_id, JobRecord::mark_running).await else {
            return;
        };

        let processor = Arc::clone(&shared.processor);
        let input = document.clone();
        let outcome = tokio::task::spawn_blocking(move || processor.process_document(&input)).await;

        match outcome {
            Ok(processed) => {
                let contract_type = processed.contract_type;
                if let Some(done) = shared.update(job_id, |r| r.complete(processed)).await {
                    tracing::info!(
                        worker_id,
                        %job_id,
                        state = %done.state,
                        %contract_type,
                        "Job finished"
                    );
                }
                return;
            }
            Err(e) => {
                tracing::error!(
                    worker_id,
                    %job_id,
                    attempt = started.attempts,
                    error = %e,
                    "Document processing crashed"
                );
                if started.attempts >= shared.max_attempts {
                    shared.update(job_id, JobRecord::crash).await;
                    return;
                }
                shared.update(job_id, JobRecord::mark_requeued).await;
            }
        }
    }
}
