//! Printing with version-pinned import paths.

use crate::contract::Contract;
use crate::print::print_contract_with;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref OPENZEPPELIN_PREFIX: Regex =
        Regex::new(r"^@openzeppelin/contracts(-upgradeable)?").expect("static regex");
    static ref KAIA_PREFIX: Regex = Regex::new(r"^@kaiachain/contracts").expect("static regex");
}

/// Library versions pinned into import paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryVersions {
    pub openzeppelin: String,
    pub kaia: String,
}

impl Default for LibraryVersions {
    fn default() -> Self {
        Self {
            openzeppelin: "4.8.3".to_string(),
            kaia: "1.0.1".to_string(),
        }
    }
}

impl LibraryVersions {
    /// Append `@<version>` to a known package prefix; other paths pass through.
    pub fn pin(&self, path: &str) -> String {
        let pinned = OPENZEPPELIN_PREFIX.replace(path, |caps: &Captures| {
            format!("{}@{}", &caps[0], self.openzeppelin)
        });
        KAIA_PREFIX
            .replace(&pinned, |caps: &Captures| format!("{}@{}", &caps[0], self.kaia))
            .into_owned()
    }
}

/// Print a contract with every library import pinned to `versions`.
pub fn print_contract_versioned(contract: &Contract, versions: &LibraryVersions) -> String {
    print_contract_with(contract, |path| versions.pin(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions() -> LibraryVersions {
        LibraryVersions {
            openzeppelin: "4.8.3".into(),
            kaia: "1.0.1".into(),
        }
    }

    #[test]
    fn pins_openzeppelin_paths() {
        let v = versions();
        assert_eq!(
            v.pin("@openzeppelin/contracts/token/ERC20/ERC20.sol"),
            "@openzeppelin/contracts@4.8.3/token/ERC20/ERC20.sol"
        );
        assert_eq!(
            v.pin("@openzeppelin/contracts-upgradeable/proxy/utils/Initializable.sol"),
            "@openzeppelin/contracts-upgradeable@4.8.3/proxy/utils/Initializable.sol"
        );
    }

    #[test]
    fn pins_kaia_paths_only() {
        let v = versions();
        assert_eq!(
            v.pin("@kaiachain/contracts/security/Pausable.sol"),
            "@kaiachain/contracts@1.0.1/security/Pausable.sol"
        );
        assert_eq!(
            v.pin("@klaytn/contracts/KIP/token/KIP37/KIP37.sol"),
            "@klaytn/contracts/KIP/token/KIP37/KIP37.sol"
        );
    }
}
