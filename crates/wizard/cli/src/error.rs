//! Error types for the wizard CLI

use thiserror::Error;
use wizard_core::OptionsError;
use wizard_generate::GenerateError;

/// CLI errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Options(#[from] OptionsError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
