//! KIP17 non-fungible token on Kaia contracts.

use super::WizardApi;
use crate::access::{require_access_control, set_access_control, Access, ContractLibrary};
use crate::common::{contract_name, supports_interface};
use crate::contract::{Contract, ContractBuilder, ParentContract};
use crate::error::{BuildResult, OptionsError};
use crate::function::{BaseFunction, FunctionKind, Mutability};
use crate::info::{set_info, Info};
use crate::kind::Kind;
use crate::pausable::add_pausable;
use crate::print::quote;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

const LIBRARY: ContractLibrary = ContractLibrary::Kaia;
const TOKEN_PATH: &str = "@klaytn/contracts/contracts/KIP/token/KIP17";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Kip17Options {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub enumerable: bool,
    pub uri_storage: bool,
    pub burnable: bool,
    pub pausable: bool,
    pub mintable: bool,
    /// Auto-increment token ids in `safeMint`; requires `mintable`.
    pub incremental: bool,
    pub votes: bool,
    pub access: Access,
    pub info: Info,
}

impl Default for Kip17Options {
    fn default() -> Self {
        Self {
            name: "MyToken".to_string(),
            symbol: "MTK".to_string(),
            base_uri: String::new(),
            enumerable: false,
            uri_storage: false,
            burnable: false,
            pausable: false,
            mintable: false,
            incremental: false,
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
    token_uri: BaseFunction,
    base_uri: BaseFunction,
}

lazy_static! {
    static ref FUNCTIONS: Functions = Functions {
        before_token_transfer: BaseFunction::new("_beforeTokenTransfer", FunctionKind::Internal)
            .arg("from", "address")
            .arg("to", "address")
            .arg("tokenId", "uint256"),
        after_token_transfer: BaseFunction::new("_afterTokenTransfer", FunctionKind::Internal)
            .arg("from", "address")
            .arg("to", "address")
            .arg("tokenId", "uint256"),
        burn: BaseFunction::new("_burn", FunctionKind::Internal).arg("tokenId", "uint256"),
        token_uri: BaseFunction::new("tokenURI", FunctionKind::Public)
            .arg("tokenId", "uint256")
            .returns("string memory")
            .mutability(Mutability::View),
        base_uri: BaseFunction::new("_baseURI", FunctionKind::Internal)
            .returns("string memory")
            .mutability(Mutability::Pure),
    };
}

fn parent(name: &str, file: &str) -> ParentContract {
    ParentContract::new(name, format!("{TOKEN_PATH}/{file}"))
}

/// `safeMint` takes a token id unless ids are incremental, and a URI when
/// URI storage is enabled.
pub(crate) fn safe_mint_function(incremental: bool, uri_storage: bool) -> BaseFunction {
    let mut f = BaseFunction::new("safeMint", FunctionKind::Public).arg("to", "address");
    if !incremental {
        f = f.arg("tokenId", "uint256");
    }
    if uri_storage {
        f = f.arg("uri", "string memory");
    }
    f
}

pub(crate) fn validate_incremental(mintable: bool, incremental: bool) -> BuildResult<()> {
    if incremental && !mintable {
        return Err(OptionsError::new("incremental", "Requires mintable"));
    }
    Ok(())
}

pub fn build_kip17(opts: &Kip17Options) -> BuildResult<Contract> {
    let name = contract_name(&opts.name)?;
    validate_incremental(opts.mintable, opts.incremental)?;

    let mut c = ContractBuilder::new(name);

    add_base(&mut c, &opts.name, &opts.symbol);

    if !opts.base_uri.is_empty() {
        add_base_uri(&mut c, &opts.base_uri);
    }

    if opts.enumerable {
        add_enumerable(&mut c);
    }

    if opts.uri_storage {
        add_uri_storage(&mut c);
    }

    if opts.pausable {
        add_pausable(&mut c, opts.access, &[&FUNCTIONS.before_token_transfer], LIBRARY);
    }

    if opts.burnable {
        add_burnable(&mut c);
    }

    if opts.mintable {
        add_mintable(&mut c, opts.access, opts.incremental, opts.uri_storage);
    }

    if opts.votes {
        add_votes(&mut c, &opts.name);
    }

    set_access_control(&mut c, opts.access, LIBRARY);
    set_info(&mut c, &opts.info);

    Ok(c.build())
}

fn add_base(c: &mut ContractBuilder, name: &str, symbol: &str) {
    c.add_parent(parent("KIP17", "KIP17.sol"), vec![name.into(), symbol.into()]);
    c.add_override("KIP17", &FUNCTIONS.before_token_transfer);
    c.add_override("KIP17", &FUNCTIONS.after_token_transfer);
    c.add_override("KIP17", &FUNCTIONS.burn);
    c.add_override("KIP17", &FUNCTIONS.token_uri);
    c.add_override("KIP17", supports_interface());
}

fn add_base_uri(c: &mut ContractBuilder, base_uri: &str) {
    c.add_override("KIP17", &FUNCTIONS.base_uri);
    c.set_function_body(vec![format!("return {};", quote(base_uri))], &FUNCTIONS.base_uri);
}

fn add_enumerable(c: &mut ContractBuilder) {
    c.add_parent(parent("KIP17Enumerable", "extensions/KIP17Enumerable.sol"), vec![]);
    c.add_override("KIP17Enumerable", &FUNCTIONS.before_token_transfer);
    c.add_override("KIP17Enumerable", supports_interface());
}

fn add_uri_storage(c: &mut ContractBuilder) {
    c.add_parent(parent("KIP17URIStorage", "extensions/KIP17URIStorage.sol"), vec![]);
    c.add_override("KIP17URIStorage", &FUNCTIONS.burn);
    c.add_override("KIP17URIStorage", &FUNCTIONS.token_uri);
}

fn add_burnable(c: &mut ContractBuilder) {
    c.add_parent(parent("KIP17Burnable", "extensions/KIP17Burnable.sol"), vec![]);
    c.add_override("KIP17Burnable", supports_interface());
}

fn add_mintable(c: &mut ContractBuilder, access: Access, incremental: bool, uri_storage: bool) {
    let f = safe_mint_function(incremental, uri_storage);
    require_access_control(c, &f, access, "MINTER", LIBRARY);

    if incremental {
        c.add_using(
            ParentContract::new("Counters", "@klaytn/contracts/contracts/utils/Counters.sol"),
            "Counters.Counter",
        );
        c.add_variable("Counters.Counter private _tokenIdCounter;");
        c.add_function_code("uint256 tokenId = _tokenIdCounter.current();", &f);
        c.add_function_code("_tokenIdCounter.increment();", &f);
    }
    c.add_function_code("_safeMint(to, tokenId);", &f);

    if uri_storage {
        c.add_function_code("_setTokenURI(tokenId, uri);", &f);
    }
}

fn add_votes(c: &mut ContractBuilder, name: &str) {
    c.add_parent(
        ParentContract::new(
            "EIP712",
            "@klaytn/contracts/contracts/utils/cryptography/draft-EIP712.sol",
        ),
        vec![name.into(), "1".into()],
    );
    c.add_parent(parent("KIP17Votes", "extensions/draft-KIP17Votes.sol"), vec![]);
    c.add_override("KIP17Votes", &FUNCTIONS.after_token_transfer);
}

pub struct Kip17;

impl WizardApi for Kip17 {
    type Options = Kip17Options;

    const KIND: Kind = Kind::Kip17;

    fn build(opts: &Kip17Options) -> BuildResult<Contract> {
        build_kip17(opts)
    }

    fn is_access_control_required(opts: &Kip17Options) -> bool {
        opts.mintable || opts.pausable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incremental_requires_mintable() {
        let err = build_kip17(&Kip17Options {
            incremental: true,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.message("incremental"), Some("Requires mintable"));
    }

    #[test]
    fn safe_mint_arguments_follow_options() {
        let names = |f: BaseFunction| f.args.into_iter().map(|a| a.name).collect::<Vec<_>>();
        assert_eq!(names(safe_mint_function(false, false)), vec!["to", "tokenId"]);
        assert_eq!(names(safe_mint_function(true, false)), vec!["to"]);
        assert_eq!(names(safe_mint_function(true, true)), vec!["to", "uri"]);
    }

    #[test]
    fn incremental_mint_uses_counter() {
        let c = build_kip17(&Kip17Options {
            mintable: true,
            incremental: true,
            ..Default::default()
        })
        .unwrap();
        let f = c.function(&safe_mint_function(true, false)).unwrap();
        assert_eq!(f.guards(), &["_checkOwner();".to_string()]);
        assert_eq!(
            f.code(),
            &[
                "uint256 tokenId = _tokenIdCounter.current();".to_string(),
                "_tokenIdCounter.increment();".to_string(),
                "_safeMint(to, tokenId);".to_string(),
            ]
        );
        assert_eq!(c.using()[0].library.name, "Counters");
    }

    #[test]
    fn uri_storage_and_enumerable_merge_overrides() {
        let c = build_kip17(&Kip17Options {
            enumerable: true,
            uri_storage: true,
            ..Default::default()
        })
        .unwrap();
        let token_uri = c.function(&FUNCTIONS.token_uri).unwrap();
        assert_eq!(token_uri.overrides().len(), 2);
        let before = c.function(&FUNCTIONS.before_token_transfer).unwrap();
        assert!(before.overrides().contains("KIP17Enumerable"));
        assert!(c.validate().is_ok());
    }
}
