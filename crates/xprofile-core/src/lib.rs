pub mod app_config;
pub mod batch;
pub mod config;
pub mod profile;
pub mod sink;

pub use app_config::{AppConfig, Environment};
pub use batch::BatchResult;
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{Field, FieldOutcome, ProfileRecord, ProfileStatus, ValidationResult};
pub use sink::{PersistenceError, ProfileSink};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
