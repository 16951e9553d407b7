//! Corpus generation configuration

use crate::error::{GenerateError, GenerateResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use wizard_core::LibraryVersions;

/// Which generated contracts to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subset {
    /// Every buildable option combination
    #[default]
    All,
    /// Smallest set covering every import path, upgradeable and
    /// non-upgradeable contracts covered separately
    MinimalCover,
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subset::All => f.write_str("all"),
            Subset::MinimalCover => f.write_str("minimal-cover"),
        }
    }
}

impl FromStr for Subset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Subset::All),
            "minimal-cover" => Ok(Subset::MinimalCover),
            other => Err(format!(
                "unknown subset '{other}', expected 'all' or 'minimal-cover'"
            )),
        }
    }
}

/// Generation settings, usually read from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Directory receiving one `<id>.sol` per contract
    pub output_dir: PathBuf,

    pub subset: Subset,

    /// Build contracts on the rayon thread pool
    pub parallel: bool,

    /// Pin library versions in exported imports
    pub versions: Option<LibraryVersions>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            subset: Subset::All,
            parallel: true,
            versions: None,
        }
    }
}

impl GenerateConfig {
    /// Load configuration from a TOML file; a missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> GenerateResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
        Ok(toml::from_str(&contents)?)
    }
}
