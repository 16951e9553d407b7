//! Option domains for every standard.
//!
//! String-like options get a single representative value; booleans and the
//! shared access, upgradeability and info choices are enumerated in full.

use crate::alternatives::Blueprint;
use wizard_core::access::ACCESS_OPTIONS;
use wizard_core::info::info_options;
use wizard_core::standards::{QuorumMode, Timelock, Votes};
use wizard_core::upgradeable::UPGRADEABLE_OPTIONS;
use wizard_core::{
    CustomOptions, Erc1155Options, Erc20Options, Erc721Options, GenericOptions, GovernorOptions,
    Kind, Kip17Options, Kip37Options, Kip7Options,
};

fn booleans() -> Vec<bool> {
    vec![true, false]
}

pub fn kip7_blueprint() -> Blueprint<Kip7Options> {
    Blueprint::new(Kip7Options::default())
        .axis("name", vec!["MyToken"], |o, v| o.name = v.into())
        .axis("symbol", vec!["MTK"], |o, v| o.symbol = v.into())
        .axis("burnable", booleans(), |o, v| o.burnable = v)
        .axis("pausable", booleans(), |o, v| o.pausable = v)
        .axis("mintable", booleans(), |o, v| o.mintable = v)
        .axis("permit", booleans(), |o, v| o.permit = v)
        .axis("votes", booleans(), |o, v| o.votes = v)
        .axis("premint", vec!["1"], |o, v| o.premint = v.into())
        .axis("access", ACCESS_OPTIONS.to_vec(), |o, v| o.access = v)
        .axis("info", info_options(), |o, v| o.info = v)
}

pub fn kip17_blueprint() -> Blueprint<Kip17Options> {
    Blueprint::new(Kip17Options::default())
        .axis("name", vec!["MyToken"], |o, v| o.name = v.into())
        .axis("symbol", vec!["MTK"], |o, v| o.symbol = v.into())
        .axis("baseUri", vec!["https://example.com/"], |o, v| o.base_uri = v.into())
        .axis("enumerable", booleans(), |o, v| o.enumerable = v)
        .axis("uriStorage", booleans(), |o, v| o.uri_storage = v)
        .axis("burnable", booleans(), |o, v| o.burnable = v)
        .axis("pausable", booleans(), |o, v| o.pausable = v)
        .axis("mintable", booleans(), |o, v| o.mintable = v)
        .axis("incremental", booleans(), |o, v| o.incremental = v)
        .axis("access", ACCESS_OPTIONS.to_vec(), |o, v| o.access = v)
        .axis("info", info_options(), |o, v| o.info = v)
        .axis("votes", booleans(), |o, v| o.votes = v)
}

pub fn kip37_blueprint() -> Blueprint<Kip37Options> {
    Blueprint::new(Kip37Options::default())
        .axis("name", vec!["MyToken"], |o, v| o.name = v.into())
        .axis("uri", vec!["https://example.com/"], |o, v| o.uri = v.into())
        .axis("burnable", booleans(), |o, v| o.burnable = v)
        .axis("pausable", booleans(), |o, v| o.pausable = v)
        .axis("mintable", booleans(), |o, v| o.mintable = v)
        .axis("supply", booleans(), |o, v| o.supply = v)
        .axis("updatableUri", booleans(), |o, v| o.updatable_uri = v)
        .axis("access", ACCESS_OPTIONS.to_vec(), |o, v| o.access = v)
        .axis("info", info_options(), |o, v| o.info = v)
}

pub fn erc20_blueprint() -> Blueprint<Erc20Options> {
    Blueprint::new(Erc20Options::default())
        .axis("name", vec!["MyToken"], |o, v| o.name = v.into())
        .axis("symbol", vec!["MTK"], |o, v| o.symbol = v.into())
        .axis("burnable", booleans(), |o, v| o.burnable = v)
        .axis("snapshots", booleans(), |o, v| o.snapshots = v)
        .axis("pausable", booleans(), |o, v| o.pausable = v)
        .axis("mintable", booleans(), |o, v| o.mintable = v)
        .axis("permit", booleans(), |o, v| o.permit = v)
        .axis("votes", booleans(), |o, v| o.votes = v)
        .axis("flashmint", booleans(), |o, v| o.flashmint = v)
        .axis("premint", vec!["1"], |o, v| o.premint = v.into())
        .axis("access", ACCESS_OPTIONS.to_vec(), |o, v| o.access = v)
        .axis("upgradeable", UPGRADEABLE_OPTIONS.to_vec(), |o, v| o.upgradeable = v)
        .axis("info", info_options(), |o, v| o.info = v)
}

pub fn erc721_blueprint() -> Blueprint<Erc721Options> {
    Blueprint::new(Erc721Options::default())
        .axis("name", vec!["MyToken"], |o, v| o.name = v.into())
        .axis("symbol", vec!["MTK"], |o, v| o.symbol = v.into())
        .axis("baseUri", vec!["https://example.com/"], |o, v| o.base_uri = v.into())
        .axis("enumerable", booleans(), |o, v| o.enumerable = v)
        .axis("uriStorage", booleans(), |o, v| o.uri_storage = v)
        .axis("burnable", booleans(), |o, v| o.burnable = v)
        .axis("pausable", booleans(), |o, v| o.pausable = v)
        .axis("mintable", booleans(), |o, v| o.mintable = v)
        .axis("incremental", booleans(), |o, v| o.incremental = v)
        .axis("access", ACCESS_OPTIONS.to_vec(), |o, v| o.access = v)
        .axis("upgradeable", UPGRADEABLE_OPTIONS.to_vec(), |o, v| o.upgradeable = v)
        .axis("info", info_options(), |o, v| o.info = v)
        .axis("votes", booleans(), |o, v| o.votes = v)
}

pub fn erc1155_blueprint() -> Blueprint<Erc1155Options> {
    Blueprint::new(Erc1155Options::default())
        .axis("name", vec!["MyToken"], |o, v| o.name = v.into())
        .axis("uri", vec!["https://example.com/"], |o, v| o.uri = v.into())
        .axis("burnable", booleans(), |o, v| o.burnable = v)
        .axis("pausable", booleans(), |o, v| o.pausable = v)
        .axis("mintable", booleans(), |o, v| o.mintable = v)
        .axis("supply", booleans(), |o, v| o.supply = v)
        .axis("updatableUri", booleans(), |o, v| o.updatable_uri = v)
        .axis("access", ACCESS_OPTIONS.to_vec(), |o, v| o.access = v)
        .axis("upgradeable", UPGRADEABLE_OPTIONS.to_vec(), |o, v| o.upgradeable = v)
        .axis("info", info_options(), |o, v| o.info = v)
}

pub fn governor_blueprint() -> Blueprint<GovernorOptions> {
    Blueprint::new(GovernorOptions::default())
        .axis("name", vec!["MyGovernor"], |o, v| o.name = v.into())
        .axis("delay", vec!["1 week"], |o, v| o.delay = v.into())
        .axis("period", vec!["1 week"], |o, v| o.period = v.into())
        .axis("blockTime", vec![12u32], |o, v| o.block_time = v)
        .axis("proposalThreshold", vec!["0", "1000"], |o, v| {
            o.proposal_threshold = v.into()
        })
        .axis("decimals", vec![18u8], |o, v| o.decimals = v)
        .axis(
            "quorumMode",
            vec![QuorumMode::Percent, QuorumMode::Absolute],
            |o, v| o.quorum_mode = v,
        )
        .axis("quorumPercent", vec![10u32], |o, v| o.quorum_percent = v)
        .axis("quorumAbsolute", vec!["10"], |o, v| o.quorum_absolute = v.into())
        .axis("votes", vec![Votes::Erc20Votes, Votes::Erc721Votes], |o, v| o.votes = v)
        .axis(
            "timelock",
            vec![Timelock::None, Timelock::OpenZeppelin, Timelock::Compound],
            |o, v| o.timelock = v,
        )
        .axis("settings", booleans(), |o, v| o.settings = v)
        .axis("upgradeable", UPGRADEABLE_OPTIONS.to_vec(), |o, v| o.upgradeable = v)
        .axis("info", info_options(), |o, v| o.info = v)
}

pub fn custom_blueprint() -> Blueprint<CustomOptions> {
    Blueprint::new(CustomOptions::default())
        .axis("name", vec!["MyContract"], |o, v| o.name = v.into())
        .axis("pausable", booleans(), |o, v| o.pausable = v)
        .axis("access", ACCESS_OPTIONS.to_vec(), |o, v| o.access = v)
        .axis("upgradeable", UPGRADEABLE_OPTIONS.to_vec(), |o, v| o.upgradeable = v)
        .axis("info", info_options(), |o, v| o.info = v)
}

/// Every option struct for one standard, in blueprint order.
pub fn generate_kind_options(kind: Kind) -> Box<dyn Iterator<Item = GenericOptions> + Send> {
    match kind {
        Kind::Kip7 => Box::new(kip7_blueprint().alternatives().map(GenericOptions::Kip7)),
        Kind::Kip17 => Box::new(kip17_blueprint().alternatives().map(GenericOptions::Kip17)),
        Kind::Kip37 => Box::new(kip37_blueprint().alternatives().map(GenericOptions::Kip37)),
        Kind::Erc20 => Box::new(erc20_blueprint().alternatives().map(GenericOptions::Erc20)),
        Kind::Erc721 => Box::new(erc721_blueprint().alternatives().map(GenericOptions::Erc721)),
        Kind::Erc1155 => Box::new(erc1155_blueprint().alternatives().map(GenericOptions::Erc1155)),
        Kind::Governor => {
            Box::new(governor_blueprint().alternatives().map(GenericOptions::Governor))
        }
        Kind::Custom => Box::new(custom_blueprint().alternatives().map(GenericOptions::Custom)),
    }
}

/// Size of one standard's option space.
pub fn option_space_size(kind: Kind) -> usize {
    match kind {
        Kind::Kip7 => kip7_blueprint().len(),
        Kind::Kip17 => kip17_blueprint().len(),
        Kind::Kip37 => kip37_blueprint().len(),
        Kind::Erc20 => erc20_blueprint().len(),
        Kind::Erc721 => erc721_blueprint().len(),
        Kind::Erc1155 => erc1155_blueprint().len(),
        Kind::Governor => governor_blueprint().len(),
        Kind::Custom => custom_blueprint().len(),
    }
}

/// Every option struct of every standard, standards in [`Kind::ALL`] order.
pub fn generate_options() -> impl Iterator<Item = GenericOptions> + Send {
    Kind::ALL.into_iter().flat_map(generate_kind_options)
}
