//! Governor on OpenZeppelin contracts.
//!
//! All numeric options are resolved and validated before the builder is
//! created, so a rejected request never leaves a partial contract behind.

use super::WizardApi;
use crate::common::{contract_name, supports_interface, FlagOrName};
use crate::contract::{Contract, ContractBuilder, ParentContract, Value};
use crate::error::{BuildResult, OptionsError};
use crate::function::{BaseFunction, FunctionArgument, FunctionKind, Mutability};
use crate::info::{set_info, Info};
use crate::kind::Kind;
use crate::upgradeable::{set_upgradeable, UpgradeAuthority, Upgradeable};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const GOVERNANCE_PATH: &str = "@openzeppelin/contracts/governance";

/// How the quorum is expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuorumMode {
    #[default]
    Percent,
    Absolute,
}

/// Kind of voting token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Votes {
    #[default]
    Erc20Votes,
    Erc721Votes,
}

/// Timelock flavour, serialized as `false`, `"openzeppelin"` or `"compound"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FlagOrName", into = "FlagOrName")]
pub enum Timelock {
    None,
    #[default]
    OpenZeppelin,
    Compound,
}

impl TryFrom<FlagOrName> for Timelock {
    type Error = String;

    fn try_from(value: FlagOrName) -> Result<Self, Self::Error> {
        match value {
            FlagOrName::Flag(false) => Ok(Timelock::None),
            FlagOrName::Name(name) if name == "openzeppelin" => Ok(Timelock::OpenZeppelin),
            FlagOrName::Name(name) if name == "compound" => Ok(Timelock::Compound),
            other => Err(format!(
                "invalid timelock {other:?}, expected false, \"openzeppelin\" or \"compound\""
            )),
        }
    }
}

impl From<Timelock> for FlagOrName {
    fn from(timelock: Timelock) -> Self {
        match timelock {
            Timelock::None => FlagOrName::Flag(false),
            Timelock::OpenZeppelin => FlagOrName::Name("openzeppelin".into()),
            Timelock::Compound => FlagOrName::Name("compound".into()),
        }
    }
}

impl fmt::Display for Timelock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timelock::None => f.write_str("none"),
            Timelock::OpenZeppelin => f.write_str("openzeppelin"),
            Timelock::Compound => f.write_str("compound"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernorOptions {
    pub name: String,
    /// Voting delay, e.g. `1 day` or `10 blocks`.
    pub delay: String,
    /// Voting period, same format as `delay`.
    pub period: String,
    /// Seconds per block, used to convert time units to blocks.
    pub block_time: u32,
    /// Whole tokens; empty means zero.
    pub proposal_threshold: String,
    pub decimals: u8,
    pub quorum_mode: QuorumMode,
    pub quorum_percent: u32,
    pub quorum_absolute: String,
    pub votes: Votes,
    pub timelock: Timelock,
    /// Make delay, period and threshold updatable through governance.
    pub settings: bool,
    pub upgradeable: Upgradeable,
    pub info: Info,
}

impl Default for GovernorOptions {
    fn default() -> Self {
        Self {
            name: "MyGovernor".to_string(),
            delay: "1 day".to_string(),
            period: "1 week".to_string(),
            block_time: 12,
            proposal_threshold: String::new(),
            decimals: 18,
            quorum_mode: QuorumMode::Percent,
            quorum_percent: 4,
            quorum_absolute: String::new(),
            votes: Votes::Erc20Votes,
            timelock: Timelock::OpenZeppelin,
            settings: true,
            upgradeable: Upgradeable::None,
            info: Info::default(),
        }
    }
}

struct Functions {
    voting_delay: BaseFunction,
    voting_period: BaseFunction,
    proposal_threshold: BaseFunction,
    quorum: BaseFunction,
    state: BaseFunction,
    execute: BaseFunction,
    cancel: BaseFunction,
    executor: BaseFunction,
}

lazy_static! {
    static ref FUNCTIONS: Functions = Functions {
        voting_delay: BaseFunction::new("votingDelay", FunctionKind::Public)
            .returns("uint256")
            .mutability(Mutability::View),
        voting_period: BaseFunction::new("votingPeriod", FunctionKind::Public)
            .returns("uint256")
            .mutability(Mutability::View),
        proposal_threshold: BaseFunction::new("proposalThreshold", FunctionKind::Public)
            .returns("uint256")
            .mutability(Mutability::View),
        quorum: BaseFunction::new("quorum", FunctionKind::Public)
            .arg("blockNumber", "uint256")
            .returns("uint256")
            .mutability(Mutability::View),
        state: BaseFunction::new("state", FunctionKind::Public)
            .arg("proposalId", "uint256")
            .returns("ProposalState")
            .mutability(Mutability::View),
        execute: BaseFunction::new("_execute", FunctionKind::Internal)
            .arg("proposalId", "uint256")
            .arg("targets", "address[] memory")
            .arg("values", "uint256[] memory")
            .arg("calldatas", "bytes[] memory")
            .arg("descriptionHash", "bytes32"),
        cancel: BaseFunction::new("_cancel", FunctionKind::Internal)
            .arg("targets", "address[] memory")
            .arg("values", "uint256[] memory")
            .arg("calldatas", "bytes[] memory")
            .arg("descriptionHash", "bytes32")
            .returns("uint256"),
        executor: BaseFunction::new("_executor", FunctionKind::Internal)
            .returns("address")
            .mutability(Mutability::View),
    };
    static ref DURATION_PATTERN: Regex =
        Regex::new(r"^(\d+(?:\.\d+)?) +(second|minute|hour|day|week|month|year|block)s?$")
            .expect("static regex");
    static ref INTEGER_PATTERN: Regex = Regex::new(r"^\d+$").expect("static regex");
}

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 60.0 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;

/// Convert a duration such as `1 week` or `10 blocks` into a block count.
/// Time units are divided by `block_time` and rounded to the nearest block.
pub fn duration_to_blocks(duration: &str, block_time: u32) -> Result<u64, &'static str> {
    let caps = DURATION_PATTERN
        .captures(duration.trim())
        .ok_or("Bad duration format")?;
    let value: f64 = caps[1].parse().map_err(|_| "Bad duration format")?;

    let seconds = match &caps[2] {
        "block" => {
            if value.fract() != 0.0 {
                return Err("Invalid number of blocks");
            }
            return Ok(value as u64);
        }
        "second" => value,
        "minute" => value * SECONDS_PER_MINUTE,
        "hour" => value * SECONDS_PER_HOUR,
        "day" => value * SECONDS_PER_DAY,
        "week" => value * 7.0 * SECONDS_PER_DAY,
        "month" => value * 30.0 * SECONDS_PER_DAY,
        _ => value * 365.0 * SECONDS_PER_DAY,
    };
    if block_time == 0 {
        return Err("Block time must be greater than zero");
    }
    Ok((seconds / f64::from(block_time)).round() as u64)
}

enum Quorum {
    Fraction(u32),
    Absolute(String),
}

/// Options after validation, in the shape the feature modules consume.
struct Resolved {
    delay_blocks: u64,
    period_blocks: u64,
    threshold: String,
    quorum: Quorum,
}

fn resolve(opts: &GovernorOptions) -> BuildResult<Resolved> {
    let mut errors: Option<OptionsError> = None;
    let mut fail = |field: &str, message: &str| {
        errors = Some(match errors.take() {
            Some(e) => e.with(field, message),
            None => OptionsError::new(field, message),
        });
    };

    if opts.block_time == 0 {
        fail("blockTime", "Not a valid number");
    }
    let delay_blocks = duration_to_blocks(&opts.delay, opts.block_time.max(1)).unwrap_or_else(|e| {
        fail("delay", e);
        0
    });
    let period_blocks = duration_to_blocks(&opts.period, opts.block_time.max(1)).unwrap_or_else(|e| {
        fail("period", e);
        0
    });

    let threshold = if opts.proposal_threshold.is_empty() {
        "0"
    } else {
        opts.proposal_threshold.as_str()
    };
    if !INTEGER_PATTERN.is_match(threshold) {
        fail("proposalThreshold", "Not a valid number");
    }
    let threshold = token_amount(threshold, opts);

    let quorum = match opts.quorum_mode {
        QuorumMode::Percent => {
            if opts.quorum_percent > 100 {
                fail("quorumPercent", "Invalid percentage");
            }
            Quorum::Fraction(opts.quorum_percent)
        }
        QuorumMode::Absolute => {
            if !INTEGER_PATTERN.is_match(&opts.quorum_absolute) {
                fail("quorumAbsolute", "Not a valid number");
            }
            Quorum::Absolute(token_amount(&opts.quorum_absolute, opts))
        }
    };

    match errors {
        Some(e) => Err(e),
        None => Ok(Resolved {
            delay_blocks,
            period_blocks,
            threshold,
            quorum,
        }),
    }
}

/// Whole-token amount as a literal in the voting token's smallest unit.
fn token_amount(amount: &str, opts: &GovernorOptions) -> String {
    let is_zero = amount.chars().all(|c| c == '0');
    if is_zero || opts.decimals == 0 || opts.votes == Votes::Erc721Votes {
        amount.to_string()
    } else {
        format!("{}e{}", amount, opts.decimals)
    }
}

fn parent(name: &str) -> ParentContract {
    let path = if name == "Governor" {
        format!("{GOVERNANCE_PATH}/Governor.sol")
    } else {
        format!("{GOVERNANCE_PATH}/extensions/{name}.sol")
    };
    ParentContract::new(name, path)
}

pub fn build_governor(opts: &GovernorOptions) -> BuildResult<Contract> {
    let name = contract_name(&opts.name)?;
    let resolved = resolve(opts)?;

    let mut c = ContractBuilder::new(name);

    add_base(&mut c, &opts.name);
    add_settings(&mut c, opts, &resolved);
    add_counting(&mut c);
    add_votes(&mut c);
    add_quorum(&mut c, &resolved.quorum);
    add_timelock(&mut c, opts.timelock);

    set_upgradeable(&mut c, opts.upgradeable, UpgradeAuthority::Governance);
    set_info(&mut c, &opts.info);

    Ok(c.build())
}

fn add_base(c: &mut ContractBuilder, name: &str) {
    c.add_parent(parent("Governor"), vec![name.into()]);
    c.add_override("Governor", &FUNCTIONS.voting_delay);
    c.add_override("Governor", &FUNCTIONS.voting_period);
    c.add_override("Governor", &FUNCTIONS.quorum);
    c.add_override("Governor", &FUNCTIONS.state);
    c.add_override("Governor", &FUNCTIONS.execute);
    c.add_override("Governor", &FUNCTIONS.cancel);
    c.add_override("Governor", &FUNCTIONS.executor);
    c.add_override("Governor", &FUNCTIONS.proposal_threshold);
    c.add_override("Governor", supports_interface());
}

fn add_settings(c: &mut ContractBuilder, opts: &GovernorOptions, resolved: &Resolved) {
    if opts.settings {
        c.add_parent(
            parent("GovernorSettings"),
            vec![
                Value::note(resolved.delay_blocks.into(), opts.delay.as_str()),
                Value::note(resolved.period_blocks.into(), opts.period.as_str()),
                Value::lit(resolved.threshold.as_str()),
            ],
        );
        c.add_override("GovernorSettings", &FUNCTIONS.voting_delay);
        c.add_override("GovernorSettings", &FUNCTIONS.voting_period);
        c.add_override("GovernorSettings", &FUNCTIONS.proposal_threshold);
    } else {
        c.set_function_body(
            vec![format!("return {}; // {}", resolved.delay_blocks, opts.delay)],
            &FUNCTIONS.voting_delay,
        );
        c.restrict_mutability(Mutability::Pure, &FUNCTIONS.voting_delay);
        c.set_function_body(
            vec![format!("return {}; // {}", resolved.period_blocks, opts.period)],
            &FUNCTIONS.voting_period,
        );
        c.restrict_mutability(Mutability::Pure, &FUNCTIONS.voting_period);

        if !resolved.threshold.chars().all(|ch| ch == '0') {
            c.set_function_body(
                vec![format!("return {};", resolved.threshold)],
                &FUNCTIONS.proposal_threshold,
            );
            c.restrict_mutability(Mutability::Pure, &FUNCTIONS.proposal_threshold);
        }
    }
}

fn add_counting(c: &mut ContractBuilder) {
    c.add_parent(parent("GovernorCountingSimple"), vec![]);
}

fn add_votes(c: &mut ContractBuilder) {
    c.add_constructor_argument(FunctionArgument::contract("_token", "IVotes"));
    c.add_parent(parent("GovernorVotes"), vec![Value::lit("_token")]);
}

fn add_quorum(c: &mut ContractBuilder, quorum: &Quorum) {
    match quorum {
        Quorum::Fraction(percent) => {
            c.add_parent(
                parent("GovernorVotesQuorumFraction"),
                vec![u64::from(*percent).into()],
            );
            c.add_override("GovernorVotesQuorumFraction", &FUNCTIONS.quorum);
        }
        Quorum::Absolute(amount) => {
            c.set_function_body(vec![format!("return {amount};")], &FUNCTIONS.quorum);
            c.restrict_mutability(Mutability::Pure, &FUNCTIONS.quorum);
        }
    }
}

fn add_timelock(c: &mut ContractBuilder, timelock: Timelock) {
    let (parent_name, timelock_type) = match timelock {
        Timelock::None => return,
        Timelock::OpenZeppelin => ("GovernorTimelockControl", "TimelockController"),
        Timelock::Compound => ("GovernorTimelockCompound", "ICompoundTimelock"),
    };

    c.add_constructor_argument(FunctionArgument::contract("_timelock", timelock_type));
    c.add_parent(parent(parent_name), vec![Value::lit("_timelock")]);
    c.add_override(parent_name, &FUNCTIONS.state);
    c.add_override(parent_name, &FUNCTIONS.execute);
    c.add_override(parent_name, &FUNCTIONS.cancel);
    c.add_override(parent_name, &FUNCTIONS.executor);
    c.add_override(parent_name, supports_interface());
}

pub struct Governor;

impl WizardApi for Governor {
    type Options = GovernorOptions;

    const KIND: Kind = Kind::Governor;

    fn build(opts: &GovernorOptions) -> BuildResult<Contract> {
        build_governor(opts)
    }

    /// Governance gates itself; upgrades use `onlyGovernance`.
    fn is_access_control_required(_opts: &GovernorOptions) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_convert_to_blocks() {
        assert_eq!(duration_to_blocks("1 day", 12), Ok(7200));
        assert_eq!(duration_to_blocks("1 week", 12), Ok(50400));
        assert_eq!(duration_to_blocks("10 blocks", 12), Ok(10));
        assert_eq!(duration_to_blocks(" 1 block ", 12), Ok(1));
        assert_eq!(duration_to_blocks("1.5 minutes", 12), Ok(8));
        assert_eq!(duration_to_blocks("1.5 blocks", 12), Err("Invalid number of blocks"));
        assert_eq!(duration_to_blocks("soon", 12), Err("Bad duration format"));
    }

    #[test]
    fn token_amounts_scale_by_decimals() {
        let opts = GovernorOptions::default();
        assert_eq!(token_amount("1000", &opts), "1000e18");
        assert_eq!(token_amount("0", &opts), "0");
        let nft = GovernorOptions {
            votes: Votes::Erc721Votes,
            ..Default::default()
        };
        assert_eq!(token_amount("1000", &nft), "1000");
    }

    #[test]
    fn invalid_fields_are_all_reported() {
        let err = build_governor(&GovernorOptions {
            delay: "whenever".into(),
            proposal_threshold: "many".into(),
            quorum_percent: 150,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.message("delay"), Some("Bad duration format"));
        assert_eq!(err.message("proposalThreshold"), Some("Not a valid number"));
        assert_eq!(err.message("quorumPercent"), Some("Invalid percentage"));
        assert_eq!(err.messages().len(), 3);
    }

    #[test]
    fn zero_block_time_is_rejected() {
        let err = build_governor(&GovernorOptions {
            block_time: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.message("blockTime"), Some("Not a valid number"));
    }

    #[test]
    fn absolute_quorum_needs_a_number() {
        let err = build_governor(&GovernorOptions {
            quorum_mode: QuorumMode::Absolute,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.message("quorumAbsolute"), Some("Not a valid number"));
    }

    #[test]
    fn settings_parent_carries_annotated_blocks() {
        let c = build_governor(&GovernorOptions::default()).unwrap();
        assert_eq!(
            c.constructor_args_for("GovernorSettings"),
            Some(
                &[
                    Value::note(Value::Number(7200), "1 day"),
                    Value::note(Value::Number(50400), "1 week"),
                    Value::lit("0"),
                ][..]
            )
        );
        assert!(c.validate().is_ok());
    }

    #[test]
    fn without_settings_parameters_are_pure_bodies() {
        let c = build_governor(&GovernorOptions {
            settings: false,
            proposal_threshold: "1000".into(),
            ..Default::default()
        })
        .unwrap();
        let delay = c.function(&FUNCTIONS.voting_delay).unwrap();
        assert_eq!(delay.final_body(), Some(&["return 7200; // 1 day".to_string()][..]));
        assert_eq!(delay.mutability(), Mutability::Pure);
        let threshold = c.function(&FUNCTIONS.proposal_threshold).unwrap();
        assert_eq!(threshold.final_body(), Some(&["return 1000e18;".to_string()][..]));
    }

    #[test]
    fn timelock_serde() {
        assert_eq!(serde_json::to_string(&Timelock::None).unwrap(), "false");
        assert_eq!(
            serde_json::from_str::<Timelock>("\"compound\"").unwrap(),
            Timelock::Compound
        );
        assert_eq!(serde_json::to_string(&Votes::Erc721Votes).unwrap(), "\"erc721votes\"");
    }
}
