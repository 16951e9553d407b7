//! Per-standard options and build functions.
//!
//! Each standard exposes the same surface through [`WizardApi`]: an options
//! struct whose `Default` holds the documented defaults, a build function
//! that applies feature modules in the standard's fixed order, and the
//! access-control predicate UI layers use to force an access choice.

use crate::contract::Contract;
use crate::error::BuildResult;
use crate::kind::Kind;
use crate::print::print_contract;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod custom;
pub mod erc1155;
pub mod erc20;
pub mod erc721;
pub mod governor;
pub mod kip17;
pub mod kip37;
pub mod kip7;

pub use custom::{build_custom, Custom, CustomOptions};
pub use erc1155::{build_erc1155, Erc1155, Erc1155Options};
pub use erc20::{build_erc20, Erc20, Erc20Options};
pub use erc721::{build_erc721, Erc721, Erc721Options};
pub use governor::{build_governor, Governor, GovernorOptions, QuorumMode, Timelock, Votes};
pub use kip17::{build_kip17, Kip17, Kip17Options};
pub use kip37::{build_kip37, Kip37, Kip37Options};
pub use kip7::{build_kip7, Kip7, Kip7Options};

/// Uniform entry points for one standard.
pub trait WizardApi {
    type Options: Clone + Default + Serialize + DeserializeOwned;

    const KIND: Kind;

    /// Build a contract, or report why the options cannot be encoded.
    fn build(opts: &Self::Options) -> BuildResult<Contract>;

    /// Whether the options gate any function behind access control, so a
    /// caller must not offer "no access control".
    fn is_access_control_required(opts: &Self::Options) -> bool;

    fn print(opts: &Self::Options) -> BuildResult<String> {
        Self::build(opts).map(|c| print_contract(&c))
    }

    fn defaults() -> Self::Options {
        Self::Options::default()
    }
}
