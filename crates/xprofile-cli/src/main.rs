mod csv_sink;
mod db;
mod input;
mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;
use crate::scrape::SinkKind;

#[derive(Debug, Parser)]
#[command(name = "xprofile")]
#[command(about = "Extract public profile fields from Twitter/X profile pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every profile listed in a CSV file
    Scrape {
        /// CSV file containing profile references
        #[arg(long)]
        input: PathBuf,
        /// Column holding the references (defaults to `XPROFILE_INPUT_COLUMN`)
        #[arg(long)]
        column: Option<String>,
        /// Where to persist the extracted records
        #[arg(long, value_enum, default_value_t = SinkKind::Csv)]
        sink: SinkKind,
        /// Output path for the csv sink
        #[arg(long, default_value = "scraped_twitter_profiles.csv")]
        output: PathBuf,
    },
    /// Scrape a single profile URL and print it as JSON
    Profile {
        /// Profile URL, e.g. <https://x.com/janedoe>
        url: String,
    },
    /// Check references against the profile URL rules
    Validate {
        /// References to check
        #[arg(required = true)]
        refs: Vec<String>,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

impl Commands {
    /// Whether the command reads `AppConfig`; `validate` works without it.
    fn needs_config(&self) -> bool {
        !matches!(self, Commands::Validate { .. })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = xprofile_core::load_app_config();
    let log_level = config
        .as_ref()
        .map_or("info", |config| config.log_level.as_str());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let Some(command) = cli.command else {
        println!("no command given; run `xprofile --help` for usage");
        return Ok(());
    };
    if !command.needs_config() {
        if let Err(err) = &config {
            tracing::debug!(error = %err, "ignoring configuration error");
        }
    }

    match command {
        Commands::Validate { refs } => scrape::run_validate(&refs),
        Commands::Scrape {
            input,
            column,
            sink,
            output,
        } => {
            let config = config?;
            let column = column.unwrap_or_else(|| config.input_column.clone());
            scrape::run_scrape(&config, &input, &column, sink, &output).await?;
        }
        Commands::Profile { url } => scrape::run_profile(&config?, &url).await?,
        Commands::Db { command } => db::run_db(&config?, command).await?,
    }

    Ok(())
}
