use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::profile::{ProfileRecord, ProfileStatus};

/// Everything a batch run produced.
///
/// `records` holds exactly one entry per valid reference, in processing
/// order. Rejected references are listed in `invalid` and never produce a
/// record.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: Vec<ProfileRecord>,
    pub invalid: Vec<String>,
    /// Set when the sink rejected the batch; the records above are still valid.
    pub persist_error: Option<String>,
}

impl BatchResult {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == ProfileStatus::Success)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }

    #[must_use]
    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}
