//! Contract composition engine.
//!
//! Feature modules apply additive, order-tolerant deltas to a
//! [`ContractBuilder`]; each standard's build function runs them in a fixed
//! order and the printer turns the finished [`Contract`] into Solidity.
//!
//! ```
//! use wizard_core::{build_generic, print_contract, Erc20Options, GenericOptions};
//!
//! let opts = GenericOptions::Erc20(Erc20Options {
//!     mintable: true,
//!     ..Default::default()
//! });
//! let contract = build_generic(&opts).unwrap();
//! assert!(print_contract(&contract).contains("function mint(address to, uint256 amount)"));
//! ```

#![deny(unsafe_code)]

pub mod access;
pub mod common;
pub mod contract;
pub mod error;
pub mod function;
pub mod generic;
pub mod info;
pub mod kind;
mod lines;
pub mod pausable;
pub mod premint;
pub mod print;
pub mod print_versioned;
pub mod standards;
pub mod upgradeable;

pub use access::{Access, ContractLibrary};
pub use contract::{Contract, ContractBuilder, ContractFunction, Parent, ParentContract, Value};
pub use error::{BuildResult, InvariantError, OptionsError};
pub use function::{BaseFunction, FunctionArgument, FunctionId, FunctionKind, Mutability};
pub use generic::{build_generic, print_generic, GenericOptions};
pub use info::Info;
pub use kind::{sanitize_kind, Kind, UnknownKind};
pub use print::{print_contract, print_contract_with};
pub use print_versioned::{print_contract_versioned, LibraryVersions};
pub use standards::{
    Custom, CustomOptions, Erc1155, Erc1155Options, Erc20, Erc20Options, Erc721, Erc721Options,
    Governor, GovernorOptions, Kip17, Kip17Options, Kip37, Kip37Options, Kip7, Kip7Options,
    WizardApi,
};
pub use upgradeable::Upgradeable;
