//! Reading profile references from a CSV file.

use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Reads every value of `column` from the CSV at `path`, in row order.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not valid CSV, or has
/// no header named `column`.
pub(crate) fn read_references(path: &Path, column: &str) -> anyhow::Result<Vec<String>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;
    read_references_from(file, column)
        .with_context(|| format!("failed to read references from {}", path.display()))
}

fn read_references_from<R: Read>(reader: R, column: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| {
            let found: Vec<&str> = headers.iter().collect();
            anyhow::anyhow!("column \"{column}\" not found in input (columns: {found:?})")
        })?;

    let mut references = Vec::new();
    for row in reader.records() {
        let row = row?;
        references.push(row.get(index).unwrap_or_default().to_string());
    }
    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_column_in_row_order() {
        let data = "Name,Profile URL\nAlice,https://x.com/alice\nBob,@https://twitter.com/bob\n";
        let refs = read_references_from(data.as_bytes(), "Profile URL").unwrap();
        assert_eq!(refs, ["https://x.com/alice", "@https://twitter.com/bob"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = "Name,Handle\nAlice,alice\n";
        let err = read_references_from(data.as_bytes(), "Profile URL").unwrap_err();
        assert!(err.to_string().contains("Profile URL"), "got: {err}");
    }

    #[test]
    fn empty_cells_are_kept_as_references() {
        let data = "Profile URL,Note\n,blank\nhttps://x.com/a,ok\n";
        let refs = read_references_from(data.as_bytes(), "Profile URL").unwrap();
        assert_eq!(refs, ["", "https://x.com/a"]);
    }

    #[test]
    fn header_only_file_yields_no_references() {
        let refs = read_references_from("Profile URL\n".as_bytes(), "Profile URL").unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_references(Path::new("/nonexistent/profiles.csv"), "Profile URL")
            .unwrap_err();
        assert!(err.to_string().contains("profiles.csv"), "got: {err}");
    }
}
