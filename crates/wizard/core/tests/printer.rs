//! Exact printer output for representative contracts.

use wizard_core::standards::GovernorOptions;
use wizard_core::{
    build_generic, print_contract, print_contract_versioned, Access, Erc20Options, GenericOptions,
    Info, Kip37Options, LibraryVersions, Upgradeable,
};

fn print(opts: GenericOptions) -> String {
    print_contract(&build_generic(&opts).unwrap())
}

const ERC20_MINTABLE_PAUSABLE: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.9;

import "@openzeppelin/contracts/token/ERC20/ERC20.sol";
import "@openzeppelin/contracts/security/Pausable.sol";
import "@openzeppelin/contracts/access/Ownable.sol";
import "@openzeppelin/contracts/token/ERC20/extensions/ERC20Pausable.sol";

contract MyToken is ERC20, Pausable, Ownable, ERC20Pausable {
    constructor() ERC20("MyToken", "MTK") {}

    function pause() public {
        _checkOwner();
        _pause();
    }

    function unpause() public {
        _checkOwner();
        _unpause();
    }

    function mint(address to, uint256 amount) public {
        _checkOwner();
        _mint(to, amount);
    }

    // The following functions are overrides required by Solidity.

    function _beforeTokenTransfer(address from, address to, uint256 amount)
        internal
        override(ERC20, ERC20Pausable)
    {
        super._beforeTokenTransfer(from, to, amount);
    }
}
"#;

#[test]
fn erc20_mintable_pausable() {
    let out = print(GenericOptions::Erc20(Erc20Options {
        mintable: true,
        pausable: true,
        ..Default::default()
    }));
    assert_eq!(out, ERC20_MINTABLE_PAUSABLE);
}

#[test]
fn kip37_defaults() {
    let out = print(GenericOptions::Kip37(Kip37Options::default()));
    assert_eq!(
        out,
        r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.9;

import "@klaytn/contracts/KIP/token/KIP37/KIP37.sol";
import "@kaiachain/contracts/access/Ownable.sol";

contract MyToken is KIP37, Ownable {
    constructor() KIP37("") {}

    function setURI(string memory newuri) public {
        _checkOwner();
        _setURI(newuri);
    }
}
"#
    );
}

#[test]
fn erc20_uups_with_roles() {
    let out = print(GenericOptions::Erc20(Erc20Options {
        mintable: true,
        access: Access::Roles,
        upgradeable: Upgradeable::Uups,
        ..Default::default()
    }));
    assert_eq!(
        out,
        r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.9;

import "@openzeppelin/contracts-upgradeable/proxy/utils/Initializable.sol";
import "@openzeppelin/contracts-upgradeable/token/ERC20/ERC20Upgradeable.sol";
import "@openzeppelin/contracts-upgradeable/access/AccessControlUpgradeable.sol";
import "@openzeppelin/contracts-upgradeable/proxy/utils/UUPSUpgradeable.sol";

contract MyToken is Initializable, ERC20Upgradeable, AccessControlUpgradeable, UUPSUpgradeable {
    bytes32 public constant MINTER_ROLE = keccak256("MINTER_ROLE");
    bytes32 public constant UPGRADER_ROLE = keccak256("UPGRADER_ROLE");

    /// @custom:oz-upgrades-unsafe-allow constructor
    constructor() {
        _disableInitializers();
    }

    function initialize() initializer public {
        __ERC20_init("MyToken", "MTK");
        __AccessControl_init();
        __UUPSUpgradeable_init();

        _grantRole(DEFAULT_ADMIN_ROLE, msg.sender);
        _grantRole(MINTER_ROLE, msg.sender);
        _grantRole(UPGRADER_ROLE, msg.sender);
    }

    function mint(address to, uint256 amount) public {
        _checkRole(MINTER_ROLE);
        _mint(to, amount);
    }

    function _authorizeUpgrade(address newImplementation) internal override {
        _checkRole(UPGRADER_ROLE);
    }
}
"#
    );
}

#[test]
fn info_sets_license_and_contact() {
    let out = print(GenericOptions::Erc20(Erc20Options {
        info: Info {
            security_contact: "security@example.com".into(),
            license: "WTFPL".into(),
        },
        ..Default::default()
    }));
    assert!(out.starts_with("// SPDX-License-Identifier: WTFPL\n"));
    assert!(out.contains(
        "/// @custom:security-contact security@example.com\ncontract MyToken is ERC20 {\n"
    ));
}

#[test]
fn governor_defaults_forward_constructor_arguments() {
    let out = print(GenericOptions::Governor(GovernorOptions::default()));
    assert!(out.contains(
        "    constructor(IVotes _token, TimelockController _timelock)\n\
         \x20       Governor(\"MyGovernor\")\n\
         \x20       GovernorSettings(7200 /* 1 day */, 50400 /* 1 week */, 0)\n\
         \x20       GovernorVotes(_token)\n\
         \x20       GovernorVotesQuorumFraction(4)\n\
         \x20       GovernorTimelockControl(_timelock)\n\
         \x20   {}\n"
    ));
    assert!(out.contains("override(Governor, GovernorTimelockControl)"));
    assert!(out.contains("        return super.quorum(blockNumber);\n"));
}

#[test]
fn governor_uups_is_gated_by_governance() {
    let out = print(GenericOptions::Governor(GovernorOptions {
        upgradeable: Upgradeable::Uups,
        ..Default::default()
    }));
    assert!(out.contains("onlyGovernance"));
    assert!(!out.contains("Ownable"));
    assert!(out.contains("import \"@openzeppelin/contracts-upgradeable/governance/GovernorUpgradeable.sol\";"));
}

#[test]
fn versioned_print_pins_every_import() {
    let contract = build_generic(&GenericOptions::Erc20(Erc20Options {
        pausable: true,
        ..Default::default()
    }))
    .unwrap();
    let out = print_contract_versioned(&contract, &LibraryVersions::default());
    for line in out.lines().filter(|l| l.starts_with("import")) {
        assert!(line.starts_with("import \"@openzeppelin/contracts@4.8.3/"), "{line}");
    }
}
