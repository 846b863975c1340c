//! Database maintenance command handlers.

use clap::Subcommand;
use xprofile_core::AppConfig;

/// Sub-commands available under `db`.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check that the database is reachable
    Ping,
}

/// Connect using `DATABASE_URL` and the pool settings from `config`.
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let database_url = config.require_database_url()?;
    let pool_config = xprofile_db::PoolConfig::from_app_config(config);
    let pool = xprofile_db::connect_pool(database_url, pool_config).await?;
    Ok(pool)
}

pub(crate) async fn run_db(config: &AppConfig, command: DbCommands) -> anyhow::Result<()> {
    let pool = connect(config).await?;
    match command {
        DbCommands::Migrate => {
            let applied = xprofile_db::run_migrations(&pool).await?;
            tracing::info!(applied, "migrations complete");
            println!("applied {applied} migration(s)");
        }
        DbCommands::Ping => {
            xprofile_db::ping(&pool).await?;
            println!("database reachable");
        }
    }
    pool.close().await;
    Ok(())
}
