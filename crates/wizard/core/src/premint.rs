//! Premint amount parsing.

use crate::error::{BuildResult, OptionsError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PREMINT_PATTERN: Regex =
        Regex::new(r"^(\d*)(?:\.(\d+))?(?:e(\d+))?$").expect("static regex");
}

/// Largest number of trailing zeroes a premint may expand to.
const MAX_EXPANDED_ZEROES: i64 = 77;

/// Check that `amount` is a decimal number, optionally with an exponent.
pub fn validate_premint(amount: &str) -> BuildResult<()> {
    premint_statement(amount).map(|_| ())
}

/// The constructor statement minting `amount` whole tokens to the deployer,
/// or `None` for a zero amount.
///
/// `1.5` becomes `_mint(msg.sender, 15 * 10 ** (decimals() - 1));` and
/// `2e3` becomes `_mint(msg.sender, 2000 * 10 ** decimals());`.
pub fn premint_statement(amount: &str) -> BuildResult<Option<String>> {
    let invalid = || OptionsError::new("premint", "Not a valid number");
    let caps = PREMINT_PATTERN.captures(amount).ok_or_else(invalid)?;

    let integer = caps.get(1).map_or("", |m| m.as_str()).trim_start_matches('0');
    let decimals = caps.get(2).map_or("", |m| m.as_str()).trim_end_matches('0');
    let exponent: i64 = match caps.get(3) {
        Some(m) => m.as_str().parse().map_err(|_| invalid())?,
        None => 0,
    };

    let digits = format!("{integer}{decimals}");
    if digits.chars().all(|c| c == '0') {
        return Ok(None);
    }

    let decimal_place = decimals.len() as i64 - exponent;
    if -decimal_place > MAX_EXPANDED_ZEROES {
        return Err(OptionsError::new("premint", "Amount too large"));
    }
    let zeroes = "0".repeat((-decimal_place).max(0) as usize);
    let units = format!("{digits}{zeroes}");
    let units = units.trim_start_matches('0');
    let exp = if decimal_place <= 0 {
        "decimals()".to_string()
    } else {
        format!("(decimals() - {decimal_place})")
    };

    Ok(Some(format!("_mint(msg.sender, {units} * 10 ** {exp});")))
}
