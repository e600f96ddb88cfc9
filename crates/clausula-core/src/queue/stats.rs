//! Aggregate counts over queue jobs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::job::{JobRecord, JobState};
use crate::types::ContractType;

/// Totals by job state and by classified contract type.
///
/// Every state and every contract type is present, with zero counts
/// included. Jobs that have not finished have no contract type yet and
/// only count towards `by_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub total: usize,
    pub by_state: BTreeMap<JobState, usize>,
    pub by_contract_type: BTreeMap<ContractType, usize>,
}

impl QueueStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a JobRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            *stats.by_state.entry(record.state).or_default() += 1;
            if let Some(contract_type) = record.contract_type {
                *stats.by_contract_type.entry(contract_type).or_default() += 1;
            }
        }
        stats
    }

    pub fn count(&self, state: JobState) -> usize {
        self.by_state.get(&state).copied().unwrap_or(0)
    }

    pub fn count_type(&self, contract_type: ContractType) -> usize {
        self.by_contract_type.get(&contract_type).copied().unwrap_or(0)
    }
}

impl Default for QueueStats {
    fn default() -> Self {
        Self {
            total: 0,
            by_state: JobState::iter().map(|s| (s, 0)).collect(),
            by_contract_type: ContractType::iter().map(|t| (t, 0)).collect(),
        }
    }
}
