//! CLI command implementations

pub mod access;
pub mod generate;
pub mod kinds;
pub mod print;

use crate::error::{CliError, CliResult};
use clap::Args;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;
use wizard_core::{sanitize_kind, GenericOptions};

/// Standard and options of a single contract
#[derive(Args, Debug)]
pub struct ContractArgs {
    /// Contract standard (KIP7, KIP17, KIP37, ERC20, ERC721, ERC1155, Governor, Custom)
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Options as a JSON object
    #[arg(short, long, conflicts_with = "options_file")]
    pub options: Option<String>,

    /// Read options from a JSON file
    #[arg(short = 'f', long)]
    pub options_file: Option<PathBuf>,
}

impl ContractArgs {
    /// Resolve the standard and parse its options. Without `--kind`, a
    /// `kind` field in the JSON object selects the standard. Unrecognized
    /// kinds fall back to KIP7.
    pub fn resolve(&self) -> CliResult<GenericOptions> {
        let json = match (&self.options, &self.options_file) {
            (Some(text), _) => serde_json::from_str(text)?,
            (None, Some(path)) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            (None, None) => Value::Object(Map::new()),
        };
        let Value::Object(mut fields) = json else {
            return Err(CliError::InvalidInput(
                "options must be a JSON object".to_string(),
            ));
        };

        let embedded = fields.remove("kind").unwrap_or(Value::Null);
        let kind = match &self.kind {
            Some(k) => sanitize_kind(&Value::String(k.clone())),
            None => sanitize_kind(&embedded),
        };
        debug!(kind = %kind, "Resolved contract kind");

        Ok(GenericOptions::from_json(kind, Value::Object(fields))?)
    }
}
