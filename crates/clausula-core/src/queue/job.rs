//! Job records tracked by the processing queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::types::{ContractType, ProcessedDocument, RawDocument, StructuredData};

/// Identifier assigned to a submitted document.
pub type JobId = Uuid;

/// Lifecycle state of a job.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    /// Whether the job will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }
}

/// Why a job ended in [`JobState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The document yielded no text.
    NoText,
    /// Processing panicked on every attempt.
    Crashed,
}

/// Everything known about one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub document: RawDocument,
    pub state: JobState,
    /// Number of processing attempts started.
    pub attempts: u32,
    pub contract_type: Option<ContractType>,
    #[serde(default)]
    pub structured_data: StructuredData,
    /// Length in characters of the extracted text.
    pub text_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureReason>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    pub fn new(document: RawDocument) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            document,
            state: JobState::Queued,
            attempts: 0,
            contract_type: None,
            structured_data: StructuredData::default(),
            text_len: 0,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn mark_running(&mut self) {
        self.state = JobState::Running;
        self.attempts += 1;
        self.updated_at = Utc::now();
    }

    pub(crate) fn mark_requeued(&mut self) {
        self.state = JobState::Queued;
        self.updated_at = Utc::now();
    }

    /// Record a finished pass. Blank text fails the job.
    pub(crate) fn complete(&mut self, processed: ProcessedDocument) {
        self.text_len = processed.text.chars().count();
        self.contract_type = Some(processed.contract_type);
        self.structured_data = processed.structured_data;
        if processed.text.trim().is_empty() {
            self.state = JobState::Failed;
            self.error = Some(FailureReason::NoText);
        } else {
            self.state = JobState::Succeeded;
            self.error = None;
        }
        self.updated_at = Utc::now();
    }

    pub(crate) fn crash(&mut self) {
        self.state = JobState::Failed;
        self.error = Some(FailureReason::Crashed);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_queued() {
        let record = JobRecord::new(RawDocument::new("/tmp/a.txt", "txt"));
        assert_eq!(record.state, JobState::Queued);
        assert_eq!(record.attempts, 0);
        assert!(record.contract_type.is_none());
        assert!(!record.state.is_terminal());
    }

    #[test]
    fn test_complete_blank_text_fails() {
        let mut record = JobRecord::new(RawDocument::new("/tmp/a.txt", "txt"));
        record.mark_running();
        record.complete(ProcessedDocument::empty());
        assert_eq!(record.state, JobState::Failed);
        assert_eq!(record.error, Some(FailureReason::NoText));
        assert_eq!(record.contract_type, Some(ContractType::Unknown));
        assert_eq!(record.attempts, 1);
    }

    #[test]
    fn test_complete_with_text_succeeds() {
        let mut record = JobRecord::new(RawDocument::new("/tmp/a.txt", "txt"));
        record.mark_running();
        record.complete(ProcessedDocument {
            text: "apólice de seguro".to_string(),
            contract_type: ContractType::Insurance,
            structured_data: StructuredData::default(),
        });
        assert_eq!(record.state, JobState::Succeeded);
        assert_eq!(record.text_len, 17);
        assert!(record.state.is_terminal());
    }

    #[test]
    fn test_state_names() {
        assert_eq!(JobState::Succeeded.to_string(), "succeeded");
        assert_eq!(FailureReason::NoText.to_string(), "no_text");
    }
}
