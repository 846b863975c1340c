//! Batch orchestration: partition references, extract every valid profile
//! in order on a single page session, release the session, then persist.

use std::panic::AssertUnwindSafe;

use chrono::Utc;
use futures::FutureExt;
use tracing::Instrument;
use uuid::Uuid;
use xprofile_core::{
    BatchResult, PersistenceError, ProfileRecord, ProfileSink, ValidationResult,
};

use crate::page::PageAccessor;
use crate::profile::ProfileExtractor;
use crate::validate::classify;

/// Receives batch progress. Every method defaults to doing nothing.
pub trait BatchProgress {
    /// Called once, before any extraction, with the rejected references.
    fn invalid(&self, _references: &[String]) {}

    /// Called before each profile is loaded; `index` is zero-based.
    fn started(&self, _url: &str, _index: usize, _total: usize) {}

    /// Called after each profile with the number completed so far.
    fn advanced(&self, _completed: usize, _total: usize) {}

    fn persist_failed(&self, _error: &PersistenceError) {}
}

impl BatchProgress for () {}

/// Progress reporter that writes to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl BatchProgress for LogProgress {
    fn invalid(&self, references: &[String]) {
        if !references.is_empty() {
            tracing::warn!(
                count = references.len(),
                references = ?references,
                "invalid profile references will be skipped"
            );
        }
    }

    fn started(&self, url: &str, index: usize, total: usize) {
        tracing::info!(url, position = index + 1, total, "scraping profile");
    }

    fn advanced(&self, completed: usize, total: usize) {
        tracing::debug!(completed, total, "batch progress");
    }

    fn persist_failed(&self, error: &PersistenceError) {
        tracing::error!(error = %error, "failed to persist batch");
    }
}

/// Splits references into normalized valid URLs and untouched invalid
/// references, each in input order.
#[must_use]
pub fn partition<S: AsRef<str>>(references: &[S]) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for reference in references {
        match classify(reference.as_ref()) {
            ValidationResult::Valid(url) => valid.push(url),
            ValidationResult::Invalid(raw) => invalid.push(raw),
        }
    }
    (valid, invalid)
}

/// Drives [`ProfileExtractor`] over a batch of references.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRunner {
    extractor: ProfileExtractor,
}

impl BatchRunner {
    #[must_use]
    pub fn new(extractor: ProfileExtractor) -> Self {
        Self { extractor }
    }

    /// Runs the batch to completion.
    ///
    /// The accessor is owned for the duration of the run and released once
    /// every valid reference has been processed, before the sink is called.
    /// Release also happens if extraction panics; the panic is then resumed.
    /// A sink failure is reported through `progress` and recorded on the
    /// returned result, which still carries every extracted record.
    pub async fn run<S, A, K, P>(
        &self,
        references: &[S],
        mut accessor: A,
        sink: &mut K,
        progress: &P,
    ) -> BatchResult
    where
        S: AsRef<str>,
        A: PageAccessor,
        K: ProfileSink,
        P: BatchProgress + ?Sized,
    {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let span = tracing::info_span!("batch", %run_id);

        async move {
            let (valid, invalid) = partition(references);
            tracing::info!(
                total = references.len(),
                valid = valid.len(),
                invalid = invalid.len(),
                "batch partitioned"
            );
            progress.invalid(&invalid);

            let extracted = AssertUnwindSafe(self.extract_all(&mut accessor, &valid, progress))
                .catch_unwind()
                .await;
            accessor.release().await;
            let records = match extracted {
                Ok(records) => records,
                Err(panic) => std::panic::resume_unwind(panic),
            };

            let persist_error = match sink.persist(&records).await {
                Ok(()) => {
                    tracing::info!(sink = sink.name(), records = records.len(), "batch persisted");
                    None
                }
                Err(err) => {
                    progress.persist_failed(&err);
                    Some(err.to_string())
                }
            };

            BatchResult {
                run_id,
                started_at,
                finished_at: Utc::now(),
                records,
                invalid,
                persist_error,
            }
        }
        .instrument(span)
        .await
    }

    async fn extract_all<A, P>(
        &self,
        accessor: &mut A,
        urls: &[String],
        progress: &P,
    ) -> Vec<ProfileRecord>
    where
        A: PageAccessor,
        P: BatchProgress + ?Sized,
    {
        let total = urls.len();
        let mut records = Vec::with_capacity(total);
        for (index, url) in urls.iter().enumerate() {
            progress.started(url, index, total);
            records.push(self.extractor.extract(accessor, url).await);
            progress.advanced(records.len(), total);
        }
        records
    }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
