//! Contract model and the builder feature modules share.
//!
//! [`ContractBuilder`] exposes only monotonic, order-tolerant operations
//! keyed by [`FunctionId`], so independently written feature modules can
//! touch the same member in any order and their contributions merge. A
//! finished build is frozen into a read-only [`Contract`].

use crate::error::InvariantError;
use crate::function::{BaseFunction, FunctionArgument, FunctionId, Mutability};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A base contract or library: name plus import path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentContract {
    pub name: String,
    pub path: String,
}

impl ParentContract {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A constructor argument forwarded to a parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Printed as a quoted string literal.
    String(String),
    /// Printed verbatim as a decimal integer.
    Number(u64),
    /// Printed raw (identifiers, expressions).
    Lit(String),
    /// A value followed by an inline `/* note */` comment.
    Note { value: Box<Value>, note: String },
}

impl Value {
    pub fn lit(expr: impl Into<String>) -> Self {
        Value::Lit(expr.into())
    }

    pub fn note(value: Value, note: impl Into<String>) -> Self {
        Value::Note {
            value: Box::new(value),
            note: note.into(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n)
    }
}

/// An inherited contract together with its constructor arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parent {
    pub contract: ParentContract,
    pub params: Vec<Value>,
}

/// A `using <library> for <type>;` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Using {
    pub library: ParentContract,
    pub using_for: String,
}

/// A `/// <key> <value>` tag printed above the contract header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NatspecTag {
    pub key: String,
    pub value: String,
}

/// Accumulated state for one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractFunction {
    descriptor: BaseFunction,
    mutability: Mutability,
    overrides: BTreeSet<String>,
    modifiers: Vec<String>,
    guards: Vec<String>,
    code: Vec<String>,
    final_body: Option<Vec<String>>,
}

impl ContractFunction {
    fn new(descriptor: &BaseFunction) -> Self {
        Self {
            descriptor: descriptor.clone(),
            mutability: descriptor.mutability,
            overrides: BTreeSet::new(),
            modifiers: Vec::new(),
            guards: Vec::new(),
            code: Vec::new(),
            final_body: None,
        }
    }

    pub fn descriptor(&self) -> &BaseFunction {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Effective mutability: the descriptor's, possibly restricted further.
    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    /// Names of every parent this member overrides.
    pub fn overrides(&self) -> &BTreeSet<String> {
        &self.overrides
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// Access-control statements, always printed before any other body line.
    pub fn guards(&self) -> &[String] {
        &self.guards
    }

    pub fn code(&self) -> &[String] {
        &self.code
    }

    /// Explicit full body; when set, `code` is not printed.
    pub fn final_body(&self) -> Option<&[String]> {
        self.final_body.as_deref()
    }

    /// True when the member contributes statements of its own.
    pub fn has_body(&self) -> bool {
        !self.guards.is_empty() || !self.code.is_empty() || self.final_body.is_some()
    }
}

/// A finished contract. Read-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    name: String,
    license: String,
    upgradeable: bool,
    natspec_tags: Vec<NatspecTag>,
    parents: Vec<Parent>,
    using: Vec<Using>,
    functions: IndexMap<FunctionId, ContractFunction>,
    variables: Vec<String>,
    constructor_args: Vec<FunctionArgument>,
    constructor_code: Vec<String>,
    parent_conflicts: Vec<(String, String, String)>,
}

impl Contract {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn is_upgradeable(&self) -> bool {
        self.upgradeable
    }

    pub fn natspec_tags(&self) -> &[NatspecTag] {
        &self.natspec_tags
    }

    /// Parents in declaration order, which is also the linearization order.
    pub fn parents(&self) -> &[Parent] {
        &self.parents
    }

    pub fn using(&self) -> &[Using] {
        &self.using
    }

    /// Members in insertion order.
    pub fn functions(&self) -> impl Iterator<Item = &ContractFunction> {
        self.functions.values()
    }

    pub fn function(&self, descriptor: &BaseFunction) -> Option<&ContractFunction> {
        self.functions.get(&descriptor.id())
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn constructor_args(&self) -> &[FunctionArgument] {
        &self.constructor_args
    }

    pub fn constructor_code(&self) -> &[String] {
        &self.constructor_code
    }

    pub fn has_parent(&self, name: &str) -> bool {
        self.parents.iter().any(|p| p.contract.name == name)
    }

    /// Position of a parent in the inheritance list.
    pub fn parent_index(&self, name: &str) -> Option<usize> {
        self.parents.iter().position(|p| p.contract.name == name)
    }

    /// Constructor arguments declared for the named parent.
    pub fn constructor_args_for(&self, name: &str) -> Option<&[Value]> {
        self.parents
            .iter()
            .find(|p| p.contract.name == name)
            .map(|p| p.params.as_slice())
    }

    /// Import paths of parents then libraries, deduplicated in first-seen order.
    pub fn import_paths(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.parents
            .iter()
            .map(|p| p.contract.path.as_str())
            .chain(self.using.iter().map(|u| u.library.path.as_str()))
            .filter(|path| seen.insert(*path))
            .collect()
    }

    /// Check override targets against the parent list.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if let Some((name, first, second)) = self.parent_conflicts.first() {
            return Err(InvariantError::ConflictingParentPath {
                contract: self.name.clone(),
                name: name.clone(),
                first: first.clone(),
                second: second.clone(),
            });
        }
        for function in self.functions.values() {
            for parent in &function.overrides {
                if !self.has_parent(parent) {
                    return Err(InvariantError::MissingOverrideTarget {
                        contract: self.name.clone(),
                        function: function.name().to_string(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Mutable aggregate that feature modules apply their deltas to.
#[derive(Clone, Debug)]
pub struct ContractBuilder {
    contract: Contract,
}

impl ContractBuilder {
    /// Start an empty contract. Panics on an empty name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "contract name must not be empty");
        Self {
            contract: Contract {
                name,
                license: "MIT".to_string(),
                upgradeable: false,
                natspec_tags: Vec::new(),
                parents: Vec::new(),
                using: Vec::new(),
                functions: IndexMap::new(),
                variables: Vec::new(),
                constructor_args: Vec::new(),
                constructor_code: Vec::new(),
                parent_conflicts: Vec::new(),
            },
        }
    }

    /// Current state, for modules that depend on what peers already added.
    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Freeze the contract.
    pub fn build(self) -> Contract {
        self.contract
    }

    /// Append a parent unless one with the same name exists. The first
    /// insertion's constructor arguments win. Returns whether it was added.
    pub fn add_parent(&mut self, contract: ParentContract, params: Vec<Value>) -> bool {
        let len = self.contract.parents.len();
        self.insert_parent(len, contract, params)
    }

    /// Like [`add_parent`](Self::add_parent) but places the parent ahead of
    /// every existing one. Used for bases that later parents inherit from.
    pub fn add_parent_first(&mut self, contract: ParentContract, params: Vec<Value>) -> bool {
        self.insert_parent(0, contract, params)
    }

    fn insert_parent(&mut self, index: usize, contract: ParentContract, params: Vec<Value>) -> bool {
        assert!(!contract.name.is_empty(), "parent name must not be empty");
        if let Some(existing) = self
            .contract
            .parents
            .iter()
            .find(|p| p.contract.name == contract.name)
        {
            if existing.contract.path != contract.path {
                self.contract.parent_conflicts.push((
                    contract.name.clone(),
                    existing.contract.path.clone(),
                    contract.path,
                ));
            }
            return false;
        }
        self.contract.parents.insert(index, Parent { contract, params });
        true
    }

    /// Declare `using <library> for <type>`, once per library.
    pub fn add_using(&mut self, library: ParentContract, using_for: impl Into<String>) -> bool {
        if self
            .contract
            .using
            .iter()
            .any(|u| u.library.name == library.name)
        {
            return false;
        }
        self.contract.using.push(Using {
            library,
            using_for: using_for.into(),
        });
        true
    }

    /// Ensure an entry exists for the member without changing it.
    pub fn add_function(&mut self, descriptor: &BaseFunction) -> &ContractFunction {
        self.entry(descriptor)
    }

    pub fn add_override(&mut self, parent: &str, descriptor: &BaseFunction) {
        self.entry(descriptor).overrides.insert(parent.to_string());
    }

    /// Attach a modifier invocation such as `whenNotPaused` or
    /// `onlyRole(MINTER_ROLE)`. Applying the same modifier twice is a no-op.
    pub fn add_modifier(&mut self, modifier: &str, descriptor: &BaseFunction) {
        let entry = self.entry(descriptor);
        if !entry.modifiers.iter().any(|m| m == modifier) {
            entry.modifiers.push(modifier.to_string());
        }
    }

    /// Record an access check; guards print ahead of all code lines.
    pub fn add_guard(&mut self, statement: &str, descriptor: &BaseFunction) {
        let entry = self.entry(descriptor);
        if !entry.guards.iter().any(|g| g == statement) {
            entry.guards.push(statement.to_string());
        }
    }

    pub fn add_function_code(&mut self, line: impl Into<String>, descriptor: &BaseFunction) {
        self.entry(descriptor).code.push(line.into());
    }

    /// Replace the printed body. Accumulated code lines are kept but ignored.
    pub fn set_function_body(&mut self, lines: Vec<String>, descriptor: &BaseFunction) {
        self.entry(descriptor).final_body = Some(lines);
    }

    /// Tighten the member's mutability. Never loosens it.
    pub fn restrict_mutability(&mut self, mutability: Mutability, descriptor: &BaseFunction) {
        let entry = self.entry(descriptor);
        entry.mutability = entry.mutability.max(mutability);
    }

    /// Append a state variable declaration unless already present.
    pub fn add_variable(&mut self, declaration: impl Into<String>) -> bool {
        let declaration = declaration.into();
        if self.contract.variables.contains(&declaration) {
            return false;
        }
        self.contract.variables.push(declaration);
        true
    }

    pub fn add_constructor_argument(&mut self, arg: FunctionArgument) {
        self.contract.constructor_args.push(arg);
    }

    pub fn add_constructor_code(&mut self, line: impl Into<String>) {
        self.contract.constructor_code.push(line.into());
    }

    pub fn add_natspec_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.contract.natspec_tags.push(NatspecTag {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn set_license(&mut self, license: impl Into<String>) {
        self.contract.license = license.into();
    }

    /// Print with initializers instead of a constructor.
    pub fn set_upgradeable(&mut self) {
        self.contract.upgradeable = true;
    }

    fn entry(&mut self, descriptor: &BaseFunction) -> &mut ContractFunction {
        assert!(
            !descriptor.name.is_empty(),
            "function name must not be empty"
        );
        self.contract
            .functions
            .entry(descriptor.id())
            .or_insert_with(|| ContractFunction::new(descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionKind;

    fn before_transfer() -> BaseFunction {
        BaseFunction::new("_beforeTokenTransfer", FunctionKind::Internal)
            .arg("from", "address")
            .arg("to", "address")
            .arg("amount", "uint256")
    }

    fn erc20() -> ParentContract {
        ParentContract::new("ERC20", "@openzeppelin/contracts/token/ERC20/ERC20.sol")
    }

    #[test]
    fn add_parent_first_insertion_wins() {
        let mut c = ContractBuilder::new("MyToken");
        assert!(c.add_parent(erc20(), vec!["MyToken".into(), "MTK".into()]));
        assert!(!c.add_parent(erc20(), vec!["Other".into()]));
        let contract = c.build();
        assert_eq!(contract.parents().len(), 1);
        assert_eq!(
            contract.constructor_args_for("ERC20"),
            Some(&[Value::from("MyToken"), Value::from("MTK")][..])
        );
        assert!(contract.validate().is_ok());
    }

    #[test]
    fn add_parent_first_leads_parent_list() {
        let mut c = ContractBuilder::new("MyToken");
        c.add_parent(erc20(), vec![]);
        let base = ParentContract::new("Initializable", "proxy/utils/Initializable.sol");
        assert!(c.add_parent_first(base.clone(), vec![]));
        assert!(!c.add_parent_first(base, vec![]));
        let contract = c.build();
        let names: Vec<_> = contract.parents().iter().map(|p| p.contract.name.as_str()).collect();
        assert_eq!(names, ["Initializable", "ERC20"]);
    }

    #[test]
    fn conflicting_parent_path_is_reported() {
        let mut c = ContractBuilder::new("MyToken");
        c.add_parent(erc20(), vec![]);
        c.add_parent(ParentContract::new("ERC20", "other/ERC20.sol"), vec![]);
        let err = c.build().validate().unwrap_err();
        assert!(matches!(err, InvariantError::ConflictingParentPath { .. }));
    }

    #[test]
    fn overrides_and_code_merge_across_calls() {
        let f = before_transfer();
        let mut c = ContractBuilder::new("MyToken");
        c.add_parent(erc20(), vec![]);
        c.add_override("ERC20", &f);
        c.add_function_code("a();", &f);
        c.add_override("ERC20Snapshot", &f);
        c.add_function_code("b();", &f);
        c.add_override("ERC20", &f);

        let contract = c.build();
        let entry = contract.function(&f).unwrap();
        assert_eq!(
            entry.overrides().iter().collect::<Vec<_>>(),
            vec!["ERC20", "ERC20Snapshot"]
        );
        assert_eq!(entry.code(), &["a();".to_string(), "b();".to_string()]);
        assert_eq!(contract.functions().count(), 1);
    }

    #[test]
    fn add_function_never_resets_state() {
        let f = before_transfer();
        let mut c = ContractBuilder::new("MyToken");
        c.add_modifier("whenNotPaused", &f);
        let entry = c.add_function(&f);
        assert_eq!(entry.modifiers(), &["whenNotPaused".to_string()]);
    }

    #[test]
    fn modifiers_and_guards_are_idempotent() {
        let f = BaseFunction::new("pause", FunctionKind::Public);
        let mut c = ContractBuilder::new("MyToken");
        c.add_modifier("whenNotPaused", &f);
        c.add_modifier("whenNotPaused", &f);
        c.add_guard("_checkOwner();", &f);
        c.add_guard("_checkOwner();", &f);
        let contract = c.build();
        let entry = contract.function(&f).unwrap();
        assert_eq!(entry.modifiers().len(), 1);
        assert_eq!(entry.guards().len(), 1);
    }

    #[test]
    fn final_body_keeps_code_but_takes_precedence() {
        let f = BaseFunction::new("_baseURI", FunctionKind::Internal).returns("string memory");
        let mut c = ContractBuilder::new("MyToken");
        c.add_function_code("ignored();", &f);
        c.set_function_body(vec!["return \"x\";".into()], &f);
        let contract = c.build();
        let entry = contract.function(&f).unwrap();
        assert_eq!(entry.code().len(), 1);
        assert_eq!(entry.final_body(), Some(&["return \"x\";".to_string()][..]));
    }

    #[test]
    fn mutability_only_tightens() {
        let f = BaseFunction::new("votingDelay", FunctionKind::Public).mutability(Mutability::View);
        let mut c = ContractBuilder::new("MyGovernor");
        c.restrict_mutability(Mutability::Pure, &f);
        c.restrict_mutability(Mutability::View, &f);
        assert_eq!(c.build().function(&f).unwrap().mutability(), Mutability::Pure);
    }

    #[test]
    fn variables_and_using_deduplicate() {
        let counters = ParentContract::new("Counters", "@openzeppelin/contracts/utils/Counters.sol");
        let mut c = ContractBuilder::new("MyToken");
        assert!(c.add_variable("uint256 x;"));
        assert!(!c.add_variable("uint256 x;"));
        assert!(c.add_using(counters.clone(), "Counters.Counter"));
        assert!(!c.add_using(counters, "Counters.Other"));
        let contract = c.build();
        assert_eq!(contract.variables().len(), 1);
        assert_eq!(contract.using().len(), 1);
    }

    #[test]
    fn import_paths_are_first_seen_and_include_libraries() {
        let mut c = ContractBuilder::new("MyToken");
        c.add_parent(erc20(), vec![]);
        c.add_using(
            ParentContract::new("Counters", "@openzeppelin/contracts/utils/Counters.sol"),
            "Counters.Counter",
        );
        assert_eq!(
            c.contract().import_paths(),
            vec![
                "@openzeppelin/contracts/token/ERC20/ERC20.sol",
                "@openzeppelin/contracts/utils/Counters.sol",
            ]
        );
    }

    #[test]
    fn validate_reports_missing_override_target() {
        let mut c = ContractBuilder::new("MyToken");
        c.add_parent(erc20(), vec![]);
        c.add_override("ERC20Votes", &before_transfer());
        assert_eq!(
            c.build().validate(),
            Err(InvariantError::MissingOverrideTarget {
                contract: "MyToken".into(),
                function: "_beforeTokenTransfer".into(),
                parent: "ERC20Votes".into(),
            })
        );
    }

    #[test]
    #[should_panic(expected = "function name must not be empty")]
    fn empty_function_name_is_a_programming_error() {
        let mut c = ContractBuilder::new("MyToken");
        c.add_function(&BaseFunction::new("", FunctionKind::Public));
    }

    #[test]
    #[should_panic(expected = "contract name must not be empty")]
    fn empty_contract_name_is_a_programming_error() {
        let _ = ContractBuilder::new("");
    }
}
