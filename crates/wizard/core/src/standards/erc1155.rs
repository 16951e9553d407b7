//! ERC1155 multi-token on OpenZeppelin contracts.
//!
//! Shares its member descriptors with KIP37, whose interface it mirrors.

use super::kip37::FUNCTIONS;
use super::WizardApi;
use crate::access::{require_access_control, set_access_control, Access, ContractLibrary};
use crate::common::{contract_name, supports_interface};
use crate::contract::{Contract, ContractBuilder, ParentContract};
use crate::error::BuildResult;
use crate::info::{set_info, Info};
use crate::kind::Kind;
use crate::pausable::add_pausable;
use crate::upgradeable::{set_upgradeable, UpgradeAuthority, Upgradeable};
use serde::{Deserialize, Serialize};

const LIBRARY: ContractLibrary = ContractLibrary::OpenZeppelin;
const TOKEN_PATH: &str = "@openzeppelin/contracts/token/ERC1155";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Erc1155Options {
    pub name: String,
    pub uri: String,
    pub burnable: bool,
    pub pausable: bool,
    pub mintable: bool,
    pub supply: bool,
    pub updatable_uri: bool,
    pub access: Access,
    pub upgradeable: Upgradeable,
    pub info: Info,
}

impl Default for Erc1155Options {
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
            upgradeable: Upgradeable::None,
            info: Info::default(),
        }
    }
}

fn parent(name: &str, file: &str) -> ParentContract {
    ParentContract::new(name, format!("{TOKEN_PATH}/{file}"))
}

pub fn build_erc1155(opts: &Erc1155Options) -> BuildResult<Contract> {
    let name = contract_name(&opts.name)?;

    let mut c = ContractBuilder::new(name);

    add_base(&mut c, &opts.uri);

    if opts.updatable_uri {
        add_set_uri(&mut c, opts.access);
    }

    if opts.pausable {
        add_pausable(&mut c, opts.access, &[], LIBRARY);
        add_pausable_extension(&mut c);
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
    set_upgradeable(&mut c, opts.upgradeable, UpgradeAuthority::Access(opts.access));
    set_info(&mut c, &opts.info);

    Ok(c.build())
}

fn add_base(c: &mut ContractBuilder, uri: &str) {
    c.add_parent(parent("ERC1155", "ERC1155.sol"), vec![uri.into()]);
    c.add_override("ERC1155", &FUNCTIONS.before_token_transfer);
    c.add_override("ERC1155", supports_interface());
}

fn add_set_uri(c: &mut ContractBuilder, access: Access) {
    require_access_control(c, &FUNCTIONS.set_uri, access, "URI_SETTER", LIBRARY);
    c.add_function_code("_setURI(newuri);", &FUNCTIONS.set_uri);
}

fn add_pausable_extension(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC1155Pausable", "extensions/ERC1155Pausable.sol"), vec![]);
    c.add_override("ERC1155Pausable", &FUNCTIONS.before_token_transfer);
}

fn add_burnable(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC1155Burnable", "extensions/ERC1155Burnable.sol"), vec![]);
}

fn add_mintable(c: &mut ContractBuilder, access: Access) {
    require_access_control(c, &FUNCTIONS.mint, access, "MINTER", LIBRARY);
    require_access_control(c, &FUNCTIONS.mint_batch, access, "MINTER", LIBRARY);
    c.add_function_code("_mint(account, id, amount, data);", &FUNCTIONS.mint);
    c.add_function_code("_mintBatch(to, ids, amounts, data);", &FUNCTIONS.mint_batch);
}

fn add_supply(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC1155Supply", "extensions/ERC1155Supply.sol"), vec![]);
    c.add_override("ERC1155Supply", &FUNCTIONS.before_token_transfer);
}

pub struct Erc1155;

impl WizardApi for Erc1155 {
    type Options = Erc1155Options;

    const KIND: Kind = Kind::Erc1155;

    fn build(opts: &Erc1155Options) -> BuildResult<Contract> {
        build_erc1155(opts)
    }

    fn is_access_control_required(opts: &Erc1155Options) -> bool {
        opts.mintable
            || opts.pausable
            || opts.updatable_uri
            || opts.upgradeable == Upgradeable::Uups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_collects_every_extension() {
        let c = build_erc1155(&Erc1155Options {
            pausable: true,
            supply: true,
            ..Default::default()
        })
        .unwrap();
        let hook = c.function(&FUNCTIONS.before_token_transfer).unwrap();
        assert_eq!(
            hook.overrides().iter().collect::<Vec<_>>(),
            vec!["ERC1155", "ERC1155Pausable", "ERC1155Supply"]
        );
        assert!(hook.modifiers().is_empty());
    }

    #[test]
    fn transparent_proxy_has_no_upgrade_gate() {
        let c = build_erc1155(&Erc1155Options {
            updatable_uri: false,
            upgradeable: Upgradeable::Transparent,
            ..Default::default()
        })
        .unwrap();
        assert!(c.is_upgradeable());
        assert!(!c.has_parent("UUPSUpgradeable"));
        assert!(!c.has_parent("Ownable"));
    }
}
