//! ERC20 fungible token on OpenZeppelin contracts.

use super::WizardApi;
use crate::access::{require_access_control, set_access_control, Access, ContractLibrary};
use crate::common::contract_name;
use crate::contract::{Contract, ContractBuilder, ParentContract};
use crate::error::BuildResult;
use crate::function::{BaseFunction, FunctionKind};
use crate::info::{set_info, Info};
use crate::kind::Kind;
use crate::pausable::add_pausable;
use crate::premint::premint_statement;
use crate::upgradeable::{set_upgradeable, UpgradeAuthority, Upgradeable};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

const LIBRARY: ContractLibrary = ContractLibrary::OpenZeppelin;
const TOKEN_PATH: &str = "@openzeppelin/contracts/token/ERC20";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Erc20Options {
    pub name: String,
    pub symbol: String,
    pub burnable: bool,
    pub snapshots: bool,
    pub pausable: bool,
    pub premint: String,
    pub mintable: bool,
    pub permit: bool,
    /// Implies `permit`.
    pub votes: bool,
    pub flashmint: bool,
    pub access: Access,
    pub upgradeable: Upgradeable,
    pub info: Info,
}

impl Default for Erc20Options {
    fn default() -> Self {
        Self {
            name: "MyToken".to_string(),
            symbol: "MTK".to_string(),
            burnable: false,
            snapshots: false,
            pausable: false,
            premint: "0".to_string(),
            mintable: false,
            permit: false,
            votes: false,
            flashmint: false,
            access: Access::None,
            upgradeable: Upgradeable::None,
            info: Info::default(),
        }
    }
}

struct Functions {
    before_token_transfer: BaseFunction,
    after_token_transfer: BaseFunction,
    burn: BaseFunction,
    mint_internal: BaseFunction,
    mint: BaseFunction,
    snapshot: BaseFunction,
}

lazy_static! {
    static ref FUNCTIONS: Functions = Functions {
        before_token_transfer: BaseFunction::new("_beforeTokenTransfer", FunctionKind::Internal)
            .arg("from", "address")
            .arg("to", "address")
            .arg("amount", "uint256"),
        after_token_transfer: BaseFunction::new("_afterTokenTransfer", FunctionKind::Internal)
            .arg("from", "address")
            .arg("to", "address")
            .arg("amount", "uint256"),
        burn: BaseFunction::new("_burn", FunctionKind::Internal)
            .arg("account", "address")
            .arg("amount", "uint256"),
        mint_internal: BaseFunction::new("_mint", FunctionKind::Internal)
            .arg("to", "address")
            .arg("amount", "uint256"),
        mint: BaseFunction::new("mint", FunctionKind::Public)
            .arg("to", "address")
            .arg("amount", "uint256"),
        snapshot: BaseFunction::new("snapshot", FunctionKind::Public),
    };
}

fn parent(name: &str, file: &str) -> ParentContract {
    ParentContract::new(name, format!("{TOKEN_PATH}/{file}"))
}

pub fn build_erc20(opts: &Erc20Options) -> BuildResult<Contract> {
    let name = contract_name(&opts.name)?;
    let premint = premint_statement(&opts.premint)?;

    let mut c = ContractBuilder::new(name);

    add_base(&mut c, &opts.name, &opts.symbol);

    if opts.burnable {
        add_burnable(&mut c);
    }

    if opts.snapshots {
        add_snapshot(&mut c, opts.access);
    }

    if opts.pausable {
        add_pausable(&mut c, opts.access, &[], LIBRARY);
        add_pausable_extension(&mut c);
    }

    if let Some(statement) = premint {
        c.add_constructor_code(statement);
    }

    if opts.mintable {
        add_mintable(&mut c, opts.access);
    }

    if opts.permit || opts.votes {
        add_permit(&mut c, &opts.name);
    }

    if opts.votes {
        add_votes(&mut c);
    }

    if opts.flashmint {
        add_flash_mint(&mut c);
    }

    set_access_control(&mut c, opts.access, LIBRARY);
    set_upgradeable(&mut c, opts.upgradeable, UpgradeAuthority::Access(opts.access));
    set_info(&mut c, &opts.info);

    Ok(c.build())
}

fn add_base(c: &mut ContractBuilder, name: &str, symbol: &str) {
    c.add_parent(parent("ERC20", "ERC20.sol"), vec![name.into(), symbol.into()]);
    c.add_override("ERC20", &FUNCTIONS.before_token_transfer);
    c.add_override("ERC20", &FUNCTIONS.after_token_transfer);
    c.add_override("ERC20", &FUNCTIONS.mint_internal);
    c.add_override("ERC20", &FUNCTIONS.burn);
}

fn add_burnable(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC20Burnable", "extensions/ERC20Burnable.sol"), vec![]);
}

fn add_snapshot(c: &mut ContractBuilder, access: Access) {
    c.add_parent(parent("ERC20Snapshot", "extensions/ERC20Snapshot.sol"), vec![]);
    c.add_override("ERC20Snapshot", &FUNCTIONS.before_token_transfer);
    require_access_control(c, &FUNCTIONS.snapshot, access, "SNAPSHOT", LIBRARY);
    c.add_function_code("_snapshot();", &FUNCTIONS.snapshot);
}

/// `ERC20Pausable` after `Pausable`, so the transfer hook overrides both
/// the token base and the extension.
fn add_pausable_extension(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC20Pausable", "extensions/ERC20Pausable.sol"), vec![]);
    c.add_override("ERC20Pausable", &FUNCTIONS.before_token_transfer);
}

fn add_mintable(c: &mut ContractBuilder, access: Access) {
    require_access_control(c, &FUNCTIONS.mint, access, "MINTER", LIBRARY);
    c.add_function_code("_mint(to, amount);", &FUNCTIONS.mint);
}

fn add_permit(c: &mut ContractBuilder, name: &str) {
    c.add_parent(parent("ERC20Permit", "extensions/draft-ERC20Permit.sol"), vec![name.into()]);
}

fn add_votes(c: &mut ContractBuilder) {
    assert!(
        c.contract().has_parent("ERC20Permit"),
        "ERC20Votes requires ERC20Permit"
    );
    c.add_parent(parent("ERC20Votes", "extensions/ERC20Votes.sol"), vec![]);
    c.add_override("ERC20Votes", &FUNCTIONS.mint_internal);
    c.add_override("ERC20Votes", &FUNCTIONS.burn);
    c.add_override("ERC20Votes", &FUNCTIONS.after_token_transfer);
}

fn add_flash_mint(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC20FlashMint", "extensions/ERC20FlashMint.sol"), vec![]);
}

pub struct Erc20;

impl WizardApi for Erc20 {
    type Options = Erc20Options;

    const KIND: Kind = Kind::Erc20;

    fn build(opts: &Erc20Options) -> BuildResult<Contract> {
        build_erc20(opts)
    }

    fn is_access_control_required(opts: &Erc20Options) -> bool {
        opts.mintable || opts.pausable || opts.snapshots || opts.upgradeable == Upgradeable::Uups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pausable_hook_overrides_base_and_extension() {
        let c = build_erc20(&Erc20Options {
            pausable: true,
            ..Default::default()
        })
        .unwrap();
        let hook = c.function(&FUNCTIONS.before_token_transfer).unwrap();
        assert_eq!(
            hook.overrides().iter().collect::<Vec<_>>(),
            vec!["ERC20", "ERC20Pausable"]
        );
        let order: Vec<&str> = c.parents().iter().map(|p| p.contract.name.as_str()).collect();
        assert_eq!(order, vec!["ERC20", "Pausable", "Ownable", "ERC20Pausable"]);
    }

    #[test]
    fn votes_and_snapshots_validate() {
        let c = build_erc20(&Erc20Options {
            snapshots: true,
            votes: true,
            access: Access::Roles,
            upgradeable: Upgradeable::Uups,
            ..Default::default()
        })
        .unwrap();
        assert!(c.validate().is_ok());
        assert!(c.has_parent("ERC20Permit"));
        assert!(c.is_upgradeable());
    }

    #[test]
    fn uups_requires_access_control() {
        assert!(Erc20::is_access_control_required(&Erc20Options {
            upgradeable: Upgradeable::Uups,
            ..Default::default()
        }));
        assert!(!Erc20::is_access_control_required(&Erc20Options {
            upgradeable: Upgradeable::Transparent,
            ..Default::default()
        }));
    }
}
