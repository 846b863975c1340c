//! Composes field extraction into one [`ProfileRecord`] per URL.

use xprofile_core::{Field, FieldOutcome, ProfileRecord, ProfileStatus};

use crate::fields::FieldExtractor;
use crate::page::PageAccessor;
use crate::validate::validate;

/// Produces exactly one record per URL and never fails past its boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileExtractor {
    fields: FieldExtractor,
}

impl ProfileExtractor {
    #[must_use]
    pub fn new(fields: FieldExtractor) -> Self {
        Self { fields }
    }

    /// Loads `url` in `accessor` and reads every field from it.
    ///
    /// - invalid URL → `InvalidUrl`, nothing loaded, fields empty
    /// - load timeout → `Timeout`, fields empty
    /// - any other load failure → `Error(message)`, fields empty
    /// - loaded → `Success`, each field holding its text or sentinel
    pub async fn extract<A: PageAccessor>(&self, accessor: &mut A, url: &str) -> ProfileRecord {
        if !validate(url) {
            tracing::debug!(url, "skipping invalid profile url");
            return ProfileRecord::unqueried(url, ProfileStatus::InvalidUrl);
        }

        let page = match accessor.load(url).await {
            Ok(page) => page,
            Err(err) if err.is_timeout() => {
                tracing::warn!(url, error = %err, "profile page load timed out");
                return ProfileRecord::unqueried(url, ProfileStatus::Timeout);
            }
            Err(err) => {
                tracing::warn!(url, error = %err, "profile page load failed");
                return ProfileRecord::unqueried(url, ProfileStatus::Error(err.to_string()));
            }
        };

        let mut record = ProfileRecord::unqueried(url, ProfileStatus::Success);
        let mut missing = 0usize;
        for field in Field::ALL {
            let outcome = self.fields.extract(&page, field).await;
            if let FieldOutcome::Error(reason) = &outcome {
                tracing::warn!(url, field = %field, reason, "field lookup failed");
            }
            if !outcome.is_found() {
                missing += 1;
            }
            record.set_field(field, outcome.render(field));
        }

        tracing::debug!(url, missing, "profile extracted");
        record
    }
}
