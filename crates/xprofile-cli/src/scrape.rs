//! Scrape, profile and validate command handlers.

use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use xprofile_core::{AppConfig, BatchResult, ValidationResult};
use xprofile_scraper::{
    classify, BatchRunner, FieldExtractor, HttpPageAccessor, LogProgress, PageAccessor,
    ProfileExtractor,
};

use crate::csv_sink::CsvSink;
use crate::input::read_references;

/// Destination for a scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Write a CSV file
    Csv,
    /// Append to the `twitter_profiles` table
    Postgres,
}

fn profile_extractor(config: &AppConfig) -> ProfileExtractor {
    ProfileExtractor::new(FieldExtractor::new(Duration::from_secs(
        config.username_wait_secs,
    )))
}

fn page_accessor(config: &AppConfig) -> anyhow::Result<HttpPageAccessor> {
    HttpPageAccessor::new(config.page_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build page accessor: {e}"))
}

/// Scrape every reference in `column` of `input` and persist to `sink`.
///
/// # Errors
///
/// Returns an error if the input cannot be read, the sink cannot be set up,
/// or the sink rejected the batch. In the last case the summary has already
/// been printed.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    input: &Path,
    column: &str,
    sink: SinkKind,
    output: &Path,
) -> anyhow::Result<()> {
    let references = read_references(input, column)?;
    tracing::info!(
        input = %input.display(),
        column,
        references = references.len(),
        "loaded profile references"
    );

    let runner = BatchRunner::new(profile_extractor(config));
    let accessor = page_accessor(config)?;

    let result = match sink {
        SinkKind::Csv => {
            let mut sink = CsvSink::new(output);
            let result = runner
                .run(&references, accessor, &mut sink, &LogProgress)
                .await;
            if result.persisted() {
                println!("wrote {}", sink.path().display());
            }
            result
        }
        SinkKind::Postgres => {
            let pool = crate::db::connect(config).await?;
            xprofile_db::run_migrations(&pool).await?;
            let mut sink = xprofile_db::PgProfileSink::new(pool.clone());
            let result = runner
                .run(&references, accessor, &mut sink, &LogProgress)
                .await;
            pool.close().await;
            result
        }
    };

    print_summary(&result);
    if let Some(err) = &result.persist_error {
        anyhow::bail!("failed to persist {} record(s): {err}", result.records.len());
    }
    Ok(())
}

fn print_summary(result: &BatchResult) {
    for reference in &result.invalid {
        println!("invalid reference skipped: {reference}");
    }
    println!(
        "run {}: {} scraped ({} ok, {} failed), {} invalid, {}s",
        result.run_id,
        result.records.len(),
        result.succeeded(),
        result.failed(),
        result.invalid.len(),
        (result.finished_at - result.started_at).num_seconds()
    );
}

/// Scrape one profile URL and print the record as JSON.
///
/// The URL is validated as given; no `@` or whitespace normalisation applies.
///
/// # Errors
///
/// Returns an error if the page accessor cannot be built or the record
/// cannot be serialized.
pub(crate) async fn run_profile(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let mut accessor = page_accessor(config)?;
    let record = profile_extractor(config).extract(&mut accessor, url).await;
    accessor.release().await;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Print `valid` or `invalid` for each reference.
pub(crate) fn run_validate(references: &[String]) {
    for reference in references {
        println!("{}", validation_line(reference));
    }
}

fn validation_line(reference: &str) -> String {
    match classify(reference) {
        ValidationResult::Valid(url) => format!("valid    {url}"),
        ValidationResult::Invalid(raw) => format!("invalid  {raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_line_shows_normalized_url() {
        assert_eq!(
            validation_line(" @https://x.com/alice "),
            "valid    https://x.com/alice"
        );
    }

    #[test]
    fn validation_line_keeps_invalid_reference_verbatim() {
        assert_eq!(validation_line("@bob"), "invalid  @bob");
    }
}
