//! CSV export sink.

use std::path::{Path, PathBuf};

use xprofile_core::{Field, PersistenceError, ProfileRecord, ProfileSink};

const SINK: &str = "csv";

/// Writes each batch to a CSV file, replacing any previous contents.
#[derive(Debug, Clone)]
pub(crate) struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

/// Export header in fixed column order.
pub(crate) fn header() -> Vec<&'static str> {
    let mut header = vec!["Profile URL", "Status"];
    header.extend(Field::ALL.into_iter().map(Field::label));
    header
}

fn backend(err: csv::Error) -> PersistenceError {
    PersistenceError::Backend {
        sink: SINK,
        source: Box::new(err),
    }
}

impl ProfileSink for CsvSink {
    fn name(&self) -> &'static str {
        SINK
    }

    async fn persist(&mut self, records: &[ProfileRecord]) -> Result<(), PersistenceError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(backend)?;

        writer.write_record(header()).map_err(backend)?;
        for record in records {
            writer.serialize(record).map_err(backend)?;
        }
        writer.flush().map_err(|source| PersistenceError::Io { sink: SINK, source })?;

        tracing::info!(path = %self.path.display(), rows = records.len(), "profiles exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use xprofile_core::ProfileStatus;

    use super::*;

    fn jane() -> ProfileRecord {
        let mut record = ProfileRecord::unqueried("https://x.com/janedoe", ProfileStatus::Success);
        record.username = "janedoe".to_string();
        record.display_name = "Jane Doe".to_string();
        record.bio = "Writes Rust,\nsometimes \"quotes\".".to_string();
        record.following_count = "12".to_string();
        record.followers_count = "34".to_string();
        record.location = "Element not found".to_string();
        record.website = "not found".to_string();
        record
    }

    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn header_has_fixed_order() {
        assert_eq!(
            header(),
            [
                "Profile URL",
                "Status",
                "Username",
                "Display Name",
                "Bio",
                "Following Count",
                "Followers Count",
                "Location",
                "Website",
            ]
        );
    }

    #[tokio::test]
    async fn writes_header_and_rows_with_display_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut sink = CsvSink::new(&path);
        let records = vec![
            jane(),
            ProfileRecord::unqueried("https://x.com/slow", ProfileStatus::Timeout),
        ];

        sink.persist(&records).await.unwrap();

        let (headers, rows) = read_back(&path);
        assert_eq!(headers, header());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "Success");
        assert_eq!(rows[0][4], "Writes Rust,\nsometimes \"quotes\".");
        assert_eq!(rows[0][8], "not found");
        assert_eq!(rows[1][1], "Timeout Error");
        assert_eq!(rows[1][2], "");
    }

    #[tokio::test]
    async fn empty_batch_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        CsvSink::new(&path).persist(&[]).await.unwrap();

        let (headers, rows) = read_back(&path);
        assert_eq!(headers.len(), 9);
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn second_batch_replaces_the_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut sink = CsvSink::new(&path);

        sink.persist(&[jane(), jane()]).await.unwrap();
        sink.persist(&[jane()]).await.unwrap();

        let (_, rows) = read_back(&path);
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn unwritable_path_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = CsvSink::new(&path).persist(&[jane()]).await.unwrap_err();
        assert!(err.to_string().contains("csv"), "got: {err}");
    }
}
