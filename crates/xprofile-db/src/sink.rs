use sqlx::PgPool;
use xprofile_core::{PersistenceError, ProfileRecord, ProfileSink};

use crate::profiles::insert_profiles;

/// Appends each batch to `twitter_profiles`.
#[derive(Debug, Clone)]
pub struct PgProfileSink {
    pool: PgPool,
}

impl PgProfileSink {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileSink for PgProfileSink {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn persist(&mut self, records: &[ProfileRecord]) -> Result<(), PersistenceError> {
        let written = insert_profiles(&self.pool, records)
            .await
            .map_err(|e| PersistenceError::Backend {
                sink: "postgres",
                source: Box::new(e),
            })?;
        tracing::info!(rows = written, "profiles written to twitter_profiles");
        Ok(())
    }
}
