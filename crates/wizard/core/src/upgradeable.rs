//! Upgradeability feature module.

use crate::access::{require_access_control, Access, ContractLibrary};
use crate::common::FlagOrName;
use crate::contract::{ContractBuilder, ParentContract};
use crate::function::{BaseFunction, FunctionKind};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proxy style, serialized as `false`, `"transparent"` or `"uups"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FlagOrName", into = "FlagOrName")]
pub enum Upgradeable {
    #[default]
    None,
    Transparent,
    Uups,
}

/// Every proxy style, in enumeration order.
pub const UPGRADEABLE_OPTIONS: [Upgradeable; 3] =
    [Upgradeable::None, Upgradeable::Transparent, Upgradeable::Uups];

impl Upgradeable {
    pub fn is_enabled(self) -> bool {
        self != Upgradeable::None
    }
}

impl TryFrom<FlagOrName> for Upgradeable {
    type Error = String;

    fn try_from(value: FlagOrName) -> Result<Self, Self::Error> {
        match value {
            FlagOrName::Flag(false) => Ok(Upgradeable::None),
            FlagOrName::Name(name) if name == "transparent" => Ok(Upgradeable::Transparent),
            FlagOrName::Name(name) if name == "uups" => Ok(Upgradeable::Uups),
            other => Err(format!(
                "invalid upgradeable {other:?}, expected false, \"transparent\" or \"uups\""
            )),
        }
    }
}

impl From<Upgradeable> for FlagOrName {
    fn from(upgradeable: Upgradeable) -> Self {
        match upgradeable {
            Upgradeable::None => FlagOrName::Flag(false),
            Upgradeable::Transparent => FlagOrName::Name("transparent".into()),
            Upgradeable::Uups => FlagOrName::Name("uups".into()),
        }
    }
}

impl fmt::Display for Upgradeable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upgradeable::None => f.write_str("none"),
            Upgradeable::Transparent => f.write_str("transparent"),
            Upgradeable::Uups => f.write_str("uups"),
        }
    }
}

/// Who may authorize a UUPS upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeAuthority {
    /// The contract's own access control, role `UPGRADER`.
    Access(Access),
    /// Governance proposals (`onlyGovernance`).
    Governance,
}

lazy_static! {
    static ref AUTHORIZE_UPGRADE: BaseFunction =
        BaseFunction::new("_authorizeUpgrade", FunctionKind::Internal).arg("newImplementation", "address");
}

fn initializable() -> ParentContract {
    ParentContract::new(
        "Initializable",
        "@openzeppelin/contracts-upgradeable/proxy/utils/Initializable.sol",
    )
}

fn uups_upgradeable() -> ParentContract {
    ParentContract::new(
        "UUPSUpgradeable",
        "@openzeppelin/contracts-upgradeable/proxy/utils/UUPSUpgradeable.sol",
    )
}

/// Switch the contract to initializer-based construction.
pub fn set_upgradeable(c: &mut ContractBuilder, upgradeable: Upgradeable, authority: UpgradeAuthority) {
    if !upgradeable.is_enabled() {
        return;
    }

    c.set_upgradeable();
    c.add_parent_first(initializable(), vec![]);

    if upgradeable == Upgradeable::Uups {
        match authority {
            UpgradeAuthority::Access(access) => require_access_control(
                c,
                &AUTHORIZE_UPGRADE,
                access,
                "UPGRADER",
                ContractLibrary::OpenZeppelin,
            ),
            UpgradeAuthority::Governance => c.add_modifier("onlyGovernance", &AUTHORIZE_UPGRADE),
        }
        c.add_parent(uups_upgradeable(), vec![]);
        c.add_override("UUPSUpgradeable", &AUTHORIZE_UPGRADE);
        c.set_function_body(Vec::new(), &AUTHORIZE_UPGRADE);
    }
}
