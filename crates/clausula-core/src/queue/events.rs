//! Job event bus using a tokio broadcast channel.
//!
//! Slow subscribers miss events rather than blocking workers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::job::{JobId, JobState};

const DEFAULT_CAPACITY: usize = 1024;

/// A job changed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEvent {
    pub job_id: JobId,
    pub state: JobState,
    pub attempts: u32,
}

/// Broadcast bus for job events. Events with no listener are dropped.
#[derive(Clone)]
pub struct JobEventBus {
    sender: broadcast::Sender<JobEvent>,
}

impl JobEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted from now on.
    pub fn subscribe(&self) -> JobSubscriber {
        JobSubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn emit(&self, event: JobEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for JobEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber to the job event bus.
pub struct JobSubscriber {
    receiver: broadcast::Receiver<JobEvent>,
}

impl JobSubscriber {
    /// Receive the next event, skipping over any lag.
    ///
    /// Returns None once the queue is dropped.
    pub async fn recv(&mut self) -> Option<JobEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Job subscriber lagged by {} events", n);
                    continue;
                }
            }
        }
    }

    pub fn try_recv(&mut self) -> Option<JobEvent> {
        self.receiver.try_recv().ok()
    }
}
