//! Persistence seam for completed profile records.

use std::future::Future;

use thiserror::Error;

use crate::profile::ProfileRecord;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{sink} sink I/O error: {source}")]
    Io {
        sink: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{sink} sink rejected the batch: {source}")]
    Backend {
        sink: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Destination for a finished batch of records.
///
/// `persist` receives every record of a batch at once, in processing order.
/// Implementations append; they never deduplicate by URL.
pub trait ProfileSink {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Stores `records`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the destination rejects the batch.
    fn persist(
        &mut self,
        records: &[ProfileRecord],
    ) -> impl Future<Output = Result<(), PersistenceError>>;
}
