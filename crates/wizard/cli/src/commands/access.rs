//! Access-control requirement query

use super::ContractArgs;
use crate::error::CliResult;

/// Execute the access-required command
pub fn execute(args: ContractArgs) -> CliResult<()> {
    let options = args.resolve()?;
    println!("{}", options.is_access_control_required());
    Ok(())
}
