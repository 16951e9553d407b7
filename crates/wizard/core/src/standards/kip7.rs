//! KIP7 fungible token on Kaia contracts.

use super::WizardApi;
use crate::access::{require_access_control, set_access_control, Access, ContractLibrary};
use crate::common::{contract_name, supports_interface};
use crate::contract::{Contract, ContractBuilder, ParentContract};
use crate::error::BuildResult;
use crate::function::{BaseFunction, FunctionKind};
use crate::info::{set_info, Info};
use crate::kind::Kind;
use crate::pausable::add_pausable;
use crate::premint::premint_statement;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

const LIBRARY: ContractLibrary = ContractLibrary::Kaia;
const TOKEN_PATH: &str = "@klaytn/contracts/KIP/token/KIP7";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Kip7Options {
    pub name: String,
    pub symbol: String,
    pub burnable: bool,
    pub pausable: bool,
    pub premint: String,
    pub mintable: bool,
    pub permit: bool,
    /// Implies `permit`.
    pub votes: bool,
    pub access: Access,
    pub info: Info,
}

impl Default for Kip7Options {
    fn default() -> Self {
        Self {
            name: "MyToken".to_string(),
            symbol: "MTK".to_string(),
            burnable: false,
            pausable: false,
            premint: "0".to_string(),
            mintable: false,
            permit: false,
            votes: false,
            access: Access::None,
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
    };
}

fn parent(name: &str, file: &str) -> ParentContract {
    ParentContract::new(name, format!("{TOKEN_PATH}/{file}"))
}

pub fn build_kip7(opts: &Kip7Options) -> BuildResult<Contract> {
    let name = contract_name(&opts.name)?;
    let premint = premint_statement(&opts.premint)?;

    let mut c = ContractBuilder::new(name);

    add_base(&mut c, &opts.name, &opts.symbol);

    if opts.burnable {
        add_burnable(&mut c);
    }

    if opts.pausable {
        add_pausable(&mut c, opts.access, &[&FUNCTIONS.before_token_transfer], LIBRARY);
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

    set_access_control(&mut c, opts.access, LIBRARY);
    set_info(&mut c, &opts.info);

    Ok(c.build())
}

fn add_base(c: &mut ContractBuilder, name: &str, symbol: &str) {
    c.add_parent(parent("KIP7", "KIP7.sol"), vec![name.into(), symbol.into()]);
    c.add_override("KIP7", &FUNCTIONS.before_token_transfer);
    c.add_override("KIP7", &FUNCTIONS.after_token_transfer);
    c.add_override("KIP7", &FUNCTIONS.mint_internal);
    c.add_override("KIP7", &FUNCTIONS.burn);
    c.add_override("KIP7", supports_interface());
}

fn add_burnable(c: &mut ContractBuilder) {
    c.add_parent(parent("KIP7Burnable", "extensions/KIP7Burnable.sol"), vec![]);
    c.add_override("KIP7Burnable", supports_interface());
}

fn add_mintable(c: &mut ContractBuilder, access: Access) {
    require_access_control(c, &FUNCTIONS.mint, access, "MINTER", LIBRARY);
    c.add_function_code("_mint(to, amount);", &FUNCTIONS.mint);
}

fn add_permit(c: &mut ContractBuilder, name: &str) {
    c.add_parent(parent("KIP7Permit", "extensions/draft-KIP7Permit.sol"), vec![name.into()]);
}

fn add_votes(c: &mut ContractBuilder) {
    assert!(
        c.contract().has_parent("KIP7Permit"),
        "KIP7Votes requires KIP7Permit"
    );
    c.add_parent(parent("KIP7Votes", "extensions/KIP7Votes.sol"), vec![]);
    c.add_override("KIP7Votes", &FUNCTIONS.after_token_transfer);
    c.add_override("KIP7Votes", &FUNCTIONS.mint_internal);
    c.add_override("KIP7Votes", &FUNCTIONS.burn);
}

pub struct Kip7;

impl WizardApi for Kip7 {
    type Options = Kip7Options;

    const KIND: Kind = Kind::Kip7;

    fn build(opts: &Kip7Options) -> BuildResult<Contract> {
        build_kip7(opts)
    }

    fn is_access_control_required(opts: &Kip7Options) -> bool {
        opts.mintable || opts.pausable
    }
}
