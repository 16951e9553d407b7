//! Descriptors and helpers shared by several standards.

use crate::error::{BuildResult, OptionsError};
use crate::function::{BaseFunction, FunctionKind, Mutability};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref SUPPORTS_INTERFACE: BaseFunction = BaseFunction::new("supportsInterface", FunctionKind::Public)
        .arg("interfaceId", "bytes4")
        .returns("bool")
        .mutability(Mutability::View);
}

/// ERC-165 `supportsInterface(bytes4)`, overridden by every base that
/// registers interfaces.
pub fn supports_interface() -> &'static BaseFunction {
    &SUPPORTS_INTERFACE
}

/// Option values that are either `false` or a named choice.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum FlagOrName {
    Flag(bool),
    Name(String),
}

/// Turn free text into a Solidity identifier: leading characters that
/// cannot start an identifier are dropped and every run of other invalid
/// characters capitalizes the character after it.
pub fn to_identifier(text: &str, capitalize: bool) -> String {
    let trimmed =
        text.trim_start_matches(|c: char| !(c.is_ascii_alphabetic() || c == '$' || c == '_'));
    let mut out = String::with_capacity(trimmed.len());
    let mut upper_next = capitalize;
    for c in trimmed.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            if upper_next {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    out
}

/// Contract name derived from the `name` option.
pub(crate) fn contract_name(name: &str) -> BuildResult<String> {
    let identifier = to_identifier(name, true);
    if identifier.is_empty() {
        return Err(OptionsError::new("name", "Not a valid identifier"));
    }
    Ok(identifier)
}
