//! Print a single contract

use super::ContractArgs;
use crate::error::CliResult;
use clap::Args;
use wizard_core::{build_generic, print_contract, print_contract_versioned, LibraryVersions};

#[derive(Args, Debug)]
pub struct PrintArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// Pin library versions in import paths
    #[arg(long)]
    pub versioned: bool,

    /// OpenZeppelin version for pinned imports (implies --versioned)
    #[arg(long)]
    pub openzeppelin_version: Option<String>,

    /// Kaia contracts version for pinned imports (implies --versioned)
    #[arg(long)]
    pub kaia_version: Option<String>,
}

impl PrintArgs {
    fn versions(&self) -> Option<LibraryVersions> {
        if !self.versioned && self.openzeppelin_version.is_none() && self.kaia_version.is_none() {
            return None;
        }
        let mut versions = LibraryVersions::default();
        if let Some(v) = &self.openzeppelin_version {
            versions.openzeppelin = v.clone();
        }
        if let Some(v) = &self.kaia_version {
            versions.kaia = v.clone();
        }
        Some(versions)
    }
}

/// Execute the print command
pub fn execute(args: PrintArgs) -> CliResult<()> {
    let options = args.contract.resolve()?;
    let contract = build_generic(&options)?;
    let source = match args.versions() {
        Some(versions) => print_contract_versioned(&contract, &versions),
        None => print_contract(&contract),
    };
    print!("{}", source);
    Ok(())
}
