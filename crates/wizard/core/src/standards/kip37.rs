//! KIP37 multi-token on Kaia contracts.

use super::WizardApi;
use crate::access::{require_access_control, set_access_control, Access, ContractLibrary};
use crate::common::{contract_name, supports_interface};
use crate::contract::{Contract, ContractBuilder, ParentContract};
use crate::error::BuildResult;
use crate::function::{BaseFunction, FunctionKind};
use crate::info::{set_info, Info};
use crate::kind::Kind;
use crate::pausable::add_pausable;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

const LIBRARY: ContractLibrary = ContractLibrary::Kaia;
const TOKEN_PATH: &str = "@klaytn/contracts/KIP/token/KIP37";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Kip37Options {
    pub name: String,
    pub uri: String,
    pub burnable: bool,
    pub pausable: bool,
    pub mintable: bool,
    pub supply: bool,
    pub updatable_uri: bool,
    pub access: Access,
    pub info: Info,
}

impl Default for Kip37Options {
    fn default() -> Self {
        Self {
            name: "MyToken".to_string(),
            uri: String::new(),
            burnable: false,
            pausable: false,
            mintable: false,
            supply: false,
            updatable_uri: true,
            access: Access::None,
            info: Info::default(),
        }
    }
}

pub(crate) struct Functions {
    pub(crate) before_token_transfer: BaseFunction,
    pub(crate) set_uri: BaseFunction,
    pub(crate) mint: BaseFunction,
    pub(crate) mint_batch: BaseFunction,
}

lazy_static! {
    pub(crate) static ref FUNCTIONS: Functions = Functions {
        before_token_transfer: BaseFunction::new("_beforeTokenTransfer", FunctionKind::Internal)
            .arg("operator", "address")
            .arg("from", "address")
            .arg("to", "address")
            .arg("ids", "uint256[] memory")
            .arg("amounts", "uint256[] memory")
            .arg("data", "bytes memory"),
        set_uri: BaseFunction::new("setURI", FunctionKind::Public).arg("newuri", "string memory"),
        mint: BaseFunction::new("mint", FunctionKind::Public)
            .arg("account", "address")
            .arg("id", "uint256")
            .arg("amount", "uint256")
            .arg("data", "bytes memory"),
        mint_batch: BaseFunction::new("mintBatch", FunctionKind::Public)
            .arg("to", "address")
            .arg("ids", "uint256[] memory")
            .arg("amounts", "uint256[] memory")
            .arg("data", "bytes memory"),
    };
}

fn parent(name: &str, file: &str) -> ParentContract {
    ParentContract::new(name, format!("{TOKEN_PATH}/{file}"))
}

pub fn build_kip37(opts: &Kip37Options) -> BuildResult<Contract> {
    let name = contract_name(&opts.name)?;

    let mut c = ContractBuilder::new(name);

    add_base(&mut c, &opts.uri);

    if opts.updatable_uri {
        add_set_uri(&mut c, opts.access);
    }

    if opts.pausable {
        add_pausable(&mut c, opts.access, &[&FUNCTIONS.before_token_transfer], LIBRARY);
    }

    if opts.burnable {
        add_burnable(&mut c);
    }

    if opts.mintable {
        add_mintable(&mut c, opts.access);
    }

    if opts.supply {
        add_supply(&mut c);
    }

    set_access_control(&mut c, opts.access, LIBRARY);
    set_info(&mut c, &opts.info);

    Ok(c.build())
}

fn add_base(c: &mut ContractBuilder, uri: &str) {
    c.add_parent(parent("KIP37", "KIP37.sol"), vec![uri.into()]);
    c.add_override("KIP37", &FUNCTIONS.before_token_transfer);
    c.add_override("KIP37", supports_interface());
}

fn add_set_uri(c: &mut ContractBuilder, access: Access) {
    require_access_control(c, &FUNCTIONS.set_uri, access, "URI_SETTER", LIBRARY);
    c.add_function_code("_setURI(newuri);", &FUNCTIONS.set_uri);
}

fn add_burnable(c: &mut ContractBuilder) {
    c.add_parent(parent("KIP37Burnable", "extensions/KIP37Burnable.sol"), vec![]);
    c.add_override("KIP37Burnable", supports_interface());
}

fn add_mintable(c: &mut ContractBuilder, access: Access) {
    require_access_control(c, &FUNCTIONS.mint, access, "MINTER", LIBRARY);
    require_access_control(c, &FUNCTIONS.mint_batch, access, "MINTER", LIBRARY);
    c.add_function_code("_mint(account, id, amount, data);", &FUNCTIONS.mint);
    c.add_function_code("_mintBatch(to, ids, amounts, data);", &FUNCTIONS.mint_batch);
}

fn add_supply(c: &mut ContractBuilder) {
    c.add_parent(parent("KIP37Supply", "extensions/KIP37Supply.sol"), vec![]);
    c.add_override("KIP37Supply", &FUNCTIONS.before_token_transfer);
}

pub struct Kip37;

impl WizardApi for Kip37 {
    type Options = Kip37Options;

    const KIND: Kind = Kind::Kip37;

    fn build(opts: &Kip37Options) -> BuildResult<Contract> {
        build_kip37(opts)
    }

    /// Updatable URIs are on by default, so the default options already
    /// require access control.
    fn is_access_control_required(opts: &Kip37Options) -> bool {
        opts.mintable || opts.pausable || opts.updatable_uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_require_access_control() {
        assert!(Kip37::is_access_control_required(&Kip37Options::default()));
        assert!(!Kip37::is_access_control_required(&Kip37Options {
            updatable_uri: false,
            ..Default::default()
        }));
    }

    #[test]
    fn set_uri_promotes_missing_access_to_ownable() {
        let c = build_kip37(&Kip37Options::default()).unwrap();
        assert!(c.has_parent("Ownable"));
        let set_uri = c.function(&FUNCTIONS.set_uri).unwrap();
        assert_eq!(set_uri.guards(), &["_checkOwner();".to_string()]);
    }

    #[test]
    fn pausable_and_supply_share_the_transfer_hook() {
        let c = build_kip37(&Kip37Options {
            pausable: true,
            supply: true,
            ..Default::default()
        })
        .unwrap();
        let hook = c.function(&FUNCTIONS.before_token_transfer).unwrap();
        assert_eq!(
            hook.overrides().iter().collect::<Vec<_>>(),
            vec!["KIP37", "KIP37Supply"]
        );
        assert_eq!(hook.modifiers(), &["whenNotPaused".to_string()]);
    }

    #[test]
    fn mint_and_mint_batch_share_one_role() {
        let c = build_kip37(&Kip37Options {
            mintable: true,
            access: Access::Roles,
            ..Default::default()
        })
        .unwrap();
        let minter_roles = c
            .variables()
            .iter()
            .filter(|v| v.contains("MINTER_ROLE"))
            .count();
        assert_eq!(minter_roles, 1);
        assert!(c.function(&FUNCTIONS.mint_batch).unwrap().guards()[0].contains("MINTER_ROLE"));
    }
}
