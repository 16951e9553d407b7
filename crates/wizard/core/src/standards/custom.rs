//! Custom contract: a named shell that only carries the shared features.

use super::WizardApi;
use crate::access::{set_access_control, Access, ContractLibrary};
use crate::common::contract_name;
use crate::contract::{Contract, ContractBuilder};
use crate::error::BuildResult;
use crate::info::{set_info, Info};
use crate::kind::Kind;
use crate::pausable::add_pausable;
use crate::upgradeable::{set_upgradeable, UpgradeAuthority, Upgradeable};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomOptions {
    pub name: String,
    pub pausable: bool,
    pub access: Access,
    pub upgradeable: Upgradeable,
    pub info: Info,
}

impl Default for CustomOptions {
    fn default() -> Self {
        Self {
            name: "MyContract".to_string(),
            pausable: false,
            access: Access::None,
            upgradeable: Upgradeable::None,
            info: Info::default(),
        }
    }
}

pub fn build_custom(opts: &CustomOptions) -> BuildResult<Contract> {
    let name = contract_name(&opts.name)?;
    let mut c = ContractBuilder::new(name);

    if opts.pausable {
        add_pausable(&mut c, opts.access, &[], ContractLibrary::OpenZeppelin);
    }

    set_access_control(&mut c, opts.access, ContractLibrary::OpenZeppelin);
    set_upgradeable(&mut c, opts.upgradeable, UpgradeAuthority::Access(opts.access));
    set_info(&mut c, &opts.info);

    Ok(c.build())
}

pub struct Custom;

impl WizardApi for Custom {
    type Options = CustomOptions;

    const KIND: Kind = Kind::Custom;

    fn build(opts: &CustomOptions) -> BuildResult<Contract> {
        build_custom(opts)
    }

    fn is_access_control_required(opts: &CustomOptions) -> bool {
        opts.pausable || opts.upgradeable == Upgradeable::Uups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::print_contract;

    #[test]
    fn defaults_print_an_empty_contract() {
        let c = build_custom(&CustomOptions::default()).unwrap();
        assert!(c.parents().is_empty());
        assert_eq!(
            print_contract(&c),
            "// SPDX-License-Identifier: MIT\n\
             pragma solidity ^0.8.9;\n\
             \n\
             contract MyContract {\n\
             }\n"
        );
    }

    #[test]
    fn pausable_with_roles() {
        let c = build_custom(&CustomOptions {
            pausable: true,
            access: Access::Roles,
            ..Default::default()
        })
        .unwrap();
        assert!(c.has_parent("Pausable"));
        assert!(c.has_parent("AccessControl"));
        assert!(c
            .variables()
            .iter()
            .any(|v| v.contains("PAUSER_ROLE")));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn name_is_validated() {
        let err = build_custom(&CustomOptions {
            name: "42".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.message("name").is_some());
    }
}
