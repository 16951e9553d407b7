//! Function descriptors.
//!
//! A [`BaseFunction`] is the immutable description of a callable member that
//! feature modules share. Two descriptors denote the same member when their
//! [`FunctionId`] (name plus argument types) match.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Function visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Public,
    External,
    Internal,
    Private,
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FunctionKind::Public => "public",
            FunctionKind::External => "external",
            FunctionKind::Internal => "internal",
            FunctionKind::Private => "private",
        };
        f.write_str(s)
    }
}

/// State mutability, ordered from least to most restrictive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    Payable,
    #[default]
    NonPayable,
    View,
    Pure,
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mutability::Payable => "payable",
            Mutability::NonPayable => "nonpayable",
            Mutability::View => "view",
            Mutability::Pure => "pure",
        };
        f.write_str(s)
    }
}

/// Type of a function or constructor argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgType {
    /// A language-level type such as `address` or `uint256[] memory`.
    Elementary(String),
    /// A contract or interface type; renamed along with parents when the
    /// contract is printed as upgradeable.
    Contract(String),
}

impl ArgType {
    pub fn name(&self) -> &str {
        match self {
            ArgType::Elementary(name) | ArgType::Contract(name) => name,
        }
    }
}

/// A named argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionArgument {
    pub name: String,
    pub ty: ArgType,
}

impl FunctionArgument {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ArgType::Elementary(ty.into()),
        }
    }

    pub fn contract(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ArgType::Contract(ty.into()),
        }
    }
}

/// Identity of a member: name and argument types.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId {
    pub name: String,
    pub arg_types: Vec<String>,
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arg_types.join(","))
    }
}

/// Immutable description of a callable member.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseFunction {
    pub name: String,
    pub kind: FunctionKind,
    pub mutability: Mutability,
    pub args: Vec<FunctionArgument>,
    pub returns: Vec<String>,
    /// Forward the arguments by name in a generated `super` call.
    #[serde(rename = "passthroughArgs", default = "default_passthrough")]
    pub passthrough_args: bool,
}

fn default_passthrough() -> bool {
    true
}

impl BaseFunction {
    pub fn new(name: impl Into<String>, kind: FunctionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            mutability: Mutability::NonPayable,
            args: Vec::new(),
            returns: Vec::new(),
            passthrough_args: true,
        }
    }

    /// Append an elementary-typed argument.
    pub fn arg(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.args.push(FunctionArgument::new(name, ty));
        self
    }

    /// Append a return type.
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.returns.push(ty.into());
        self
    }

    /// Call `super` without forwarding arguments.
    pub fn without_passthrough(mut self) -> Self {
        self.passthrough_args = false;
        self
    }

    pub fn mutability(mut self, mutability: Mutability) -> Self {
        self.mutability = mutability;
        self
    }

    pub fn id(&self) -> FunctionId {
        FunctionId {
            name: self.name.clone(),
            arg_types: self.args.iter().map(|a| a.ty.name().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_argument_names_and_modifiers() {
        let a = BaseFunction::new("_burn", FunctionKind::Internal).arg("tokenId", "uint256");
        let b = BaseFunction::new("_burn", FunctionKind::Internal)
            .arg("id", "uint256")
            .mutability(Mutability::View);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn identity_distinguishes_overloads() {
        let one = BaseFunction::new("_burn", FunctionKind::Internal).arg("tokenId", "uint256");
        let two = BaseFunction::new("_burn", FunctionKind::Internal)
            .arg("account", "address")
            .arg("amount", "uint256");
        assert_ne!(one.id(), two.id());
        assert_eq!(two.id().to_string(), "_burn(address,uint256)");
    }

    #[test]
    fn passthrough_does_not_affect_identity() {
        let a = BaseFunction::new("_burn", FunctionKind::Internal).arg("tokenId", "uint256");
        let b = a.clone().without_passthrough();
        assert!(a.passthrough_args);
        assert!(!b.passthrough_args);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn mutability_orders_by_restriction() {
        assert!(Mutability::Pure > Mutability::View);
        assert!(Mutability::View > Mutability::NonPayable);
        assert!(Mutability::NonPayable > Mutability::Payable);
        assert_eq!(Mutability::default(), Mutability::NonPayable);
    }

    #[test]
    fn display_keywords() {
        assert_eq!(FunctionKind::External.to_string(), "external");
        assert_eq!(Mutability::View.to_string(), "view");
    }
}
