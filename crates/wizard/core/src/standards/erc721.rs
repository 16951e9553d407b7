//! ERC721 non-fungible token on OpenZeppelin contracts.

use super::kip17::{safe_mint_function, validate_incremental};
use super::WizardApi;
use crate::access::{require_access_control, set_access_control, Access, ContractLibrary};
use crate::common::{contract_name, supports_interface};
use crate::contract::{Contract, ContractBuilder, ParentContract};
use crate::error::BuildResult;
use crate::function::{BaseFunction, FunctionKind, Mutability};
use crate::info::{set_info, Info};
use crate::kind::Kind;
use crate::pausable::add_pausable;
use crate::print::quote;
use crate::upgradeable::{set_upgradeable, UpgradeAuthority, Upgradeable};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

const LIBRARY: ContractLibrary = ContractLibrary::OpenZeppelin;
const TOKEN_PATH: &str = "@openzeppelin/contracts/token/ERC721";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Erc721Options {
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
    pub upgradeable: Upgradeable,
    pub info: Info,
}

impl Default for Erc721Options {
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
            upgradeable: Upgradeable::None,
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

pub fn build_erc721(opts: &Erc721Options) -> BuildResult<Contract> {
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
        add_pausable(&mut c, opts.access, &[], LIBRARY);
        add_pausable_extension(&mut c);
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
    set_upgradeable(&mut c, opts.upgradeable, UpgradeAuthority::Access(opts.access));
    set_info(&mut c, &opts.info);

    Ok(c.build())
}

fn add_base(c: &mut ContractBuilder, name: &str, symbol: &str) {
    c.add_parent(parent("ERC721", "ERC721.sol"), vec![name.into(), symbol.into()]);
    c.add_override("ERC721", &FUNCTIONS.before_token_transfer);
    c.add_override("ERC721", &FUNCTIONS.after_token_transfer);
    c.add_override("ERC721", &FUNCTIONS.burn);
    c.add_override("ERC721", &FUNCTIONS.token_uri);
    c.add_override("ERC721", supports_interface());
}

fn add_base_uri(c: &mut ContractBuilder, base_uri: &str) {
    c.add_override("ERC721", &FUNCTIONS.base_uri);
    c.set_function_body(vec![format!("return {};", quote(base_uri))], &FUNCTIONS.base_uri);
}

fn add_enumerable(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC721Enumerable", "extensions/ERC721Enumerable.sol"), vec![]);
    c.add_override("ERC721Enumerable", &FUNCTIONS.before_token_transfer);
    c.add_override("ERC721Enumerable", supports_interface());
}

fn add_uri_storage(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC721URIStorage", "extensions/ERC721URIStorage.sol"), vec![]);
    c.add_override("ERC721URIStorage", &FUNCTIONS.burn);
    c.add_override("ERC721URIStorage", &FUNCTIONS.token_uri);
}

fn add_pausable_extension(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC721Pausable", "extensions/ERC721Pausable.sol"), vec![]);
    c.add_override("ERC721Pausable", &FUNCTIONS.before_token_transfer);
}

fn add_burnable(c: &mut ContractBuilder) {
    c.add_parent(parent("ERC721Burnable", "extensions/ERC721Burnable.sol"), vec![]);
}

fn add_mintable(c: &mut ContractBuilder, access: Access, incremental: bool, uri_storage: bool) {
    let f = safe_mint_function(incremental, uri_storage);
    require_access_control(c, &f, access, "MINTER", LIBRARY);

    if incremental {
        c.add_using(
            ParentContract::new("Counters", "@openzeppelin/contracts/utils/Counters.sol"),
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
            "@openzeppelin/contracts/utils/cryptography/draft-EIP712.sol",
        ),
        vec![name.into(), "1".into()],
    );
    c.add_parent(parent("ERC721Votes", "extensions/draft-ERC721Votes.sol"), vec![]);
    c.add_override("ERC721Votes", &FUNCTIONS.after_token_transfer);
}

pub struct Erc721;

impl WizardApi for Erc721 {
    type Options = Erc721Options;

    const KIND: Kind = Kind::Erc721;

    fn build(opts: &Erc721Options) -> BuildResult<Contract> {
        build_erc721(opts)
    }

    fn is_access_control_required(opts: &Erc721Options) -> bool {
        opts.mintable || opts.pausable || opts.upgradeable == Upgradeable::Uups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incremental_requires_mintable() {
        let err = build_erc721(&Erc721Options {
            incremental: true,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.message("incremental"), Some("Requires mintable"));
    }

    #[test]
    fn full_featured_build_validates() {
        let c = build_erc721(&Erc721Options {
            base_uri: "https://example.com/".into(),
            enumerable: true,
            uri_storage: true,
            burnable: true,
            pausable: true,
            mintable: true,
            incremental: true,
            votes: true,
            access: Access::Roles,
            upgradeable: Upgradeable::Uups,
            ..Default::default()
        })
        .unwrap();
        assert!(c.validate().is_ok());
        let hook = c.function(&FUNCTIONS.before_token_transfer).unwrap();
        assert_eq!(hook.overrides().len(), 3);
        assert_eq!(
            c.function(&FUNCTIONS.base_uri).unwrap().final_body(),
            Some(&["return \"https://example.com/\";".to_string()][..])
        );
    }
}
