//! Access-control wiring and capability gates.

use crate::common::{supports_interface, FlagOrName};
use crate::contract::{ContractBuilder, ParentContract};
use crate::function::BaseFunction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access-control style, serialized as `false`, `"ownable"` or `"roles"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FlagOrName", into = "FlagOrName")]
pub enum Access {
    #[default]
    None,
    Ownable,
    Roles,
}

/// Every access style, in enumeration order.
pub const ACCESS_OPTIONS: [Access; 3] = [Access::None, Access::Ownable, Access::Roles];

impl TryFrom<FlagOrName> for Access {
    type Error = String;

    fn try_from(value: FlagOrName) -> Result<Self, Self::Error> {
        match value {
            FlagOrName::Flag(false) => Ok(Access::None),
            FlagOrName::Name(name) if name == "ownable" => Ok(Access::Ownable),
            FlagOrName::Name(name) if name == "roles" => Ok(Access::Roles),
            other => Err(format!(
                "invalid access {other:?}, expected false, \"ownable\" or \"roles\""
            )),
        }
    }
}

impl From<Access> for FlagOrName {
    fn from(access: Access) -> Self {
        match access {
            Access::None => FlagOrName::Flag(false),
            Access::Ownable => FlagOrName::Name("ownable".into()),
            Access::Roles => FlagOrName::Name("roles".into()),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::None => f.write_str("none"),
            Access::Ownable => f.write_str("ownable"),
            Access::Roles => f.write_str("roles"),
        }
    }
}

/// Package family that supplies the access and security parents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContractLibrary {
    OpenZeppelin,
    Kaia,
}

impl ContractLibrary {
    pub fn prefix(self) -> &'static str {
        match self {
            ContractLibrary::OpenZeppelin => "@openzeppelin/contracts",
            ContractLibrary::Kaia => "@kaiachain/contracts",
        }
    }

    pub(crate) fn parent(self, name: &str, relative_path: &str) -> ParentContract {
        ParentContract::new(name, format!("{}/{}", self.prefix(), relative_path))
    }
}

/// Add the access-control base for `access`. Runs after every gated module.
pub fn set_access_control(c: &mut ContractBuilder, access: Access, library: ContractLibrary) {
    match access {
        Access::None => {}
        Access::Ownable => {
            c.add_parent(library.parent("Ownable", "access/Ownable.sol"), vec![]);
        }
        Access::Roles => {
            if c.add_parent(library.parent("AccessControl", "access/AccessControl.sol"), vec![]) {
                c.add_constructor_code("_grantRole(DEFAULT_ADMIN_ROLE, msg.sender);");
            }
            c.add_override("AccessControl", supports_interface());
        }
    }
}

/// Gate `function` behind `access`, promoting `Access::None` to ownable.
///
/// With roles, `<role>_ROLE` is declared and granted to the deployer once.
/// The check is recorded as a guard so it prints ahead of any code other
/// modules contribute to the same member.
pub fn require_access_control(
    c: &mut ContractBuilder,
    function: &BaseFunction,
    access: Access,
    role: &str,
    library: ContractLibrary,
) {
    let access = match access {
        Access::None => Access::Ownable,
        other => other,
    };
    set_access_control(c, access, library);

    match access {
        Access::None | Access::Ownable => c.add_guard("_checkOwner();", function),
        Access::Roles => {
            let role_id = format!("{role}_ROLE");
            if c.add_variable(format!(
                "bytes32 public constant {role_id} = keccak256(\"{role_id}\");"
            )) {
                c.add_constructor_code(format!("_grantRole({role_id}, msg.sender);"));
            }
            c.add_guard(&format!("_checkRole({role_id});"), function);
        }
    }
}
