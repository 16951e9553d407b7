//! The closed set of contract standards.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    #[default]
    #[serde(rename = "KIP7")]
    Kip7,
    #[serde(rename = "KIP17")]
    Kip17,
    #[serde(rename = "KIP37")]
    Kip37,
    #[serde(rename = "ERC20")]
    Erc20,
    #[serde(rename = "ERC721")]
    Erc721,
    #[serde(rename = "ERC1155")]
    Erc1155,
    Governor,
    Custom,
}

impl Kind {
    pub const ALL: [Kind; 8] = [
        Kind::Kip7,
        Kind::Kip17,
        Kind::Kip37,
        Kind::Erc20,
        Kind::Erc721,
        Kind::Erc1155,
        Kind::Governor,
        Kind::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Kip7 => "KIP7",
            Kind::Kip17 => "KIP17",
            Kind::Kip37 => "KIP37",
            Kind::Erc20 => "ERC20",
            Kind::Erc721 => "ERC721",
            Kind::Erc1155 => "ERC1155",
            Kind::Governor => "Governor",
            Kind::Custom => "Custom",
        }
    }

    /// Whether the standard builds on the Kaia/Klaytn contract packages.
    pub fn is_kaia(self) -> bool {
        matches!(self, Kind::Kip7 | Kind::Kip17 | Kind::Kip37)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contract kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

lazy_static! {
    static ref KIND_PREFIX: Regex = Regex::new(r"(?i)^(ERC|KIP|.)").expect("static regex");
}

/// Map untrusted input to a kind. The standard prefix (or first letter) is
/// upper-cased before matching; anything unrecognized becomes KIP7.
pub fn sanitize_kind(value: &serde_json::Value) -> Kind {
    let Some(raw) = value.as_str() else {
        return Kind::default();
    };
    let sanitized = KIND_PREFIX.replace(raw, |caps: &Captures| caps[0].to_uppercase());
    sanitized.parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitizes_case_of_prefix() {
        assert_eq!(sanitize_kind(&json!("erc20")), Kind::Erc20);
        assert_eq!(sanitize_kind(&json!("kip37")), Kind::Kip37);
        assert_eq!(sanitize_kind(&json!("governor")), Kind::Governor);
        assert_eq!(sanitize_kind(&json!("Custom")), Kind::Custom);
    }

    #[test]
    fn lowercase_kip_prefix_selects_kip_standard() {
        // A lowercase `kip` prefix is upper-cased as a whole, not just its first letter.
        assert_eq!(sanitize_kind(&json!("kip17")), Kind::Kip17);
        assert_eq!(sanitize_kind(&json!("kip7")), Kind::Kip7);
        assert_eq!(sanitize_kind(&json!("Kip37")), Kind::Kip37);
    }

    #[test]
    fn unknown_input_defaults_to_kip7() {
        assert_eq!(sanitize_kind(&json!("ERC4626")), Kind::Kip7);
        assert_eq!(sanitize_kind(&json!(42)), Kind::Kip7);
        assert_eq!(sanitize_kind(&json!(null)), Kind::Kip7);
        assert_eq!(sanitize_kind(&json!("GOVERNOR")), Kind::Kip7);
    }

    #[test]
    fn parse_and_display_agree() {
        for kind in Kind::ALL {
            assert_eq!(kind.to_string().parse::<Kind>(), Ok(kind));
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
        assert!("erc20".parse::<Kind>().is_err());
    }
}
