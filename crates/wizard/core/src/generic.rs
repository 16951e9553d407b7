//! Kind-tagged options and dispatch over every standard.

use crate::contract::Contract;
use crate::error::BuildResult;
use crate::kind::Kind;
use crate::print::print_contract;
use crate::standards::{
    Custom, CustomOptions, Erc1155, Erc1155Options, Erc20, Erc20Options, Erc721, Erc721Options,
    Governor, GovernorOptions, Kip17, Kip17Options, Kip37, Kip37Options, Kip7, Kip7Options,
    WizardApi,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options for any standard, discriminated by a `kind` field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GenericOptions {
    #[serde(rename = "KIP7")]
    Kip7(Kip7Options),
    #[serde(rename = "KIP17")]
    Kip17(Kip17Options),
    #[serde(rename = "KIP37")]
    Kip37(Kip37Options),
    #[serde(rename = "ERC20")]
    Erc20(Erc20Options),
    #[serde(rename = "ERC721")]
    Erc721(Erc721Options),
    #[serde(rename = "ERC1155")]
    Erc1155(Erc1155Options),
    Governor(GovernorOptions),
    Custom(CustomOptions),
}

impl GenericOptions {
    pub fn kind(&self) -> Kind {
        match self {
            GenericOptions::Kip7(_) => Kind::Kip7,
            GenericOptions::Kip17(_) => Kind::Kip17,
            GenericOptions::Kip37(_) => Kind::Kip37,
            GenericOptions::Erc20(_) => Kind::Erc20,
            GenericOptions::Erc721(_) => Kind::Erc721,
            GenericOptions::Erc1155(_) => Kind::Erc1155,
            GenericOptions::Governor(_) => Kind::Governor,
            GenericOptions::Custom(_) => Kind::Custom,
        }
    }

    /// Defaults of one standard.
    pub fn defaults(kind: Kind) -> Self {
        match kind {
            Kind::Kip7 => GenericOptions::Kip7(Kip7::defaults()),
            Kind::Kip17 => GenericOptions::Kip17(Kip17::defaults()),
            Kind::Kip37 => GenericOptions::Kip37(Kip37::defaults()),
            Kind::Erc20 => GenericOptions::Erc20(Erc20::defaults()),
            Kind::Erc721 => GenericOptions::Erc721(Erc721::defaults()),
            Kind::Erc1155 => GenericOptions::Erc1155(Erc1155::defaults()),
            Kind::Governor => GenericOptions::Governor(Governor::defaults()),
            Kind::Custom => GenericOptions::Custom(Custom::defaults()),
        }
    }

    /// Parse standard-specific options given as a JSON object without a
    /// `kind` field. Missing fields take their defaults.
    pub fn from_json(kind: Kind, options: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            Kind::Kip7 => GenericOptions::Kip7(serde_json::from_value(options)?),
            Kind::Kip17 => GenericOptions::Kip17(serde_json::from_value(options)?),
            Kind::Kip37 => GenericOptions::Kip37(serde_json::from_value(options)?),
            Kind::Erc20 => GenericOptions::Erc20(serde_json::from_value(options)?),
            Kind::Erc721 => GenericOptions::Erc721(serde_json::from_value(options)?),
            Kind::Erc1155 => GenericOptions::Erc1155(serde_json::from_value(options)?),
            Kind::Governor => GenericOptions::Governor(serde_json::from_value(options)?),
            Kind::Custom => GenericOptions::Custom(serde_json::from_value(options)?),
        })
    }

    pub fn is_upgradeable(&self) -> bool {
        match self {
            GenericOptions::Kip7(_) | GenericOptions::Kip17(_) | GenericOptions::Kip37(_) => false,
            GenericOptions::Erc20(o) => o.upgradeable.is_enabled(),
            GenericOptions::Erc721(o) => o.upgradeable.is_enabled(),
            GenericOptions::Erc1155(o) => o.upgradeable.is_enabled(),
            GenericOptions::Governor(o) => o.upgradeable.is_enabled(),
            GenericOptions::Custom(o) => o.upgradeable.is_enabled(),
        }
    }

    /// Display name of the contract as requested.
    pub fn name(&self) -> &str {
        match self {
            GenericOptions::Kip7(o) => &o.name,
            GenericOptions::Kip17(o) => &o.name,
            GenericOptions::Kip37(o) => &o.name,
            GenericOptions::Erc20(o) => &o.name,
            GenericOptions::Erc721(o) => &o.name,
            GenericOptions::Erc1155(o) => &o.name,
            GenericOptions::Governor(o) => &o.name,
            GenericOptions::Custom(o) => &o.name,
        }
    }

    pub fn is_access_control_required(&self) -> bool {
        match self {
            GenericOptions::Kip7(o) => Kip7::is_access_control_required(o),
            GenericOptions::Kip17(o) => Kip17::is_access_control_required(o),
            GenericOptions::Kip37(o) => Kip37::is_access_control_required(o),
            GenericOptions::Erc20(o) => Erc20::is_access_control_required(o),
            GenericOptions::Erc721(o) => Erc721::is_access_control_required(o),
            GenericOptions::Erc1155(o) => Erc1155::is_access_control_required(o),
            GenericOptions::Governor(o) => Governor::is_access_control_required(o),
            GenericOptions::Custom(o) => Custom::is_access_control_required(o),
        }
    }
}

/// Build any standard. `Err` is always an invalid-options rejection.
pub fn build_generic(opts: &GenericOptions) -> BuildResult<Contract> {
    debug!(kind = %opts.kind(), name = %opts.name(), "Building contract");
    let result = match opts {
        GenericOptions::Kip7(o) => Kip7::build(o),
        GenericOptions::Kip17(o) => Kip17::build(o),
        GenericOptions::Kip37(o) => Kip37::build(o),
        GenericOptions::Erc20(o) => Erc20::build(o),
        GenericOptions::Erc721(o) => Erc721::build(o),
        GenericOptions::Erc1155(o) => Erc1155::build(o),
        GenericOptions::Governor(o) => Governor::build(o),
        GenericOptions::Custom(o) => Custom::build(o),
    };
    if let Err(e) = &result {
        debug!(kind = %opts.kind(), error = %e, "Options rejected");
    }
    result
}

pub fn print_generic(opts: &GenericOptions) -> BuildResult<String> {
    build_generic(opts).map(|c| print_contract(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Access;
    use serde_json::json;

    #[test]
    fn tagged_json_round_trip() {
        let opts: GenericOptions =
            serde_json::from_value(json!({ "kind": "ERC20", "name": "Coin", "mintable": true }))
                .unwrap();
        let GenericOptions::Erc20(erc20) = &opts else {
            panic!("expected ERC20 options");
        };
        assert_eq!(erc20.name, "Coin");
        assert_eq!(erc20.symbol, "MTK");
        assert!(erc20.mintable);
        assert_eq!(serde_json::to_value(&opts).unwrap()["kind"], json!("ERC20"));
    }

    #[test]
    fn untagged_options_take_kind_separately() {
        let opts = GenericOptions::from_json(Kind::Kip37, json!({ "access": "roles" })).unwrap();
        assert!(opts.is_access_control_required());
        let GenericOptions::Kip37(kip37) = opts else {
            panic!("expected KIP37 options");
        };
        assert_eq!(kip37.access, Access::Roles);
    }

    #[test]
    fn every_kind_builds_its_defaults() {
        for kind in Kind::ALL {
            let opts = GenericOptions::defaults(kind);
            assert_eq!(opts.kind(), kind);
            assert!(!opts.is_upgradeable());
            let contract = build_generic(&opts).unwrap();
            assert!(contract.validate().is_ok(), "{kind} defaults must validate");
        }
    }

    #[test]
    fn invalid_options_surface_as_error() {
        let opts = GenericOptions::from_json(Kind::Kip7, json!({ "premint": "lots" })).unwrap();
        let err = print_generic(&opts).unwrap_err();
        assert_eq!(err.message("premint"), Some("Not a valid number"));
    }
}
