//! Error types for corpus generation

use std::path::PathBuf;
use thiserror::Error;
use wizard_core::InvariantError;

/// Generation errors. Invalid option combinations are skipped during
/// generation and never surface here.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Generated contract {id} is inconsistent: {source}")]
    Invariant {
        id: String,
        #[source]
        source: InvariantError,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for generation
pub type GenerateResult<T> = Result<T, GenerateError>;
