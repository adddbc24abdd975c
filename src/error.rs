use std::path::PathBuf;

use config::ConfigError;
use larder_recipe::MatchError;
use larder_shared::UnitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid entry '{name}': {source}")]
    ValidationError {
        name: String,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Unit error: {0}")]
    UnitError(#[from] UnitError),

    #[error("Matching error: {0}")]
    MatchError(#[from] MatchError),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),
}

pub type AppResult<T> = Result<T, AppError>;
