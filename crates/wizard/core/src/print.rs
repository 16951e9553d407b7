//! Solidity printer.
//!
//! Pure function from a finished [`Contract`] to source text. Identical
//! contracts always print identically; corpus content addresses rely on it.

use crate::contract::{Contract, ContractFunction, Parent, Value};
use crate::function::{ArgType, FunctionArgument, Mutability};
use crate::lines::{format_lines, space_between, Lines};
use std::collections::BTreeSet;

const SOLIDITY_VERSION: &str = "^0.8.9";

/// Members whose heading parts sum past this many characters are printed
/// with one modifier per line.
const MAX_HEADING_LENGTH: usize = 72;

const OVERRIDES_COMMENT: &str = "// The following functions are overrides required by Solidity.";

const UPGRADEABLE_PATH_FROM: &str = "@openzeppelin/contracts/";
const UPGRADEABLE_PATH_TO: &str = "@openzeppelin/contracts-upgradeable/";

/// Print a contract with its import paths as declared.
pub fn print_contract(contract: &Contract) -> String {
    print_contract_with(contract, |path| path.to_string())
}

/// Print a contract, passing every import path through `transform_import`
/// after the upgradeable rewrite.
pub fn print_contract_with<F>(contract: &Contract, transform_import: F) -> String
where
    F: Fn(&str) -> String,
{
    let helpers = Helpers {
        contract,
        transform_import: &transform_import,
    };

    let mut code = Vec::new();
    let mut modifiers = Vec::new();
    let mut overrides = Vec::new();
    for function in contract.functions() {
        let printed = print_function(function, &helpers);
        if printed.is_empty() {
            continue;
        }
        if function.has_body() {
            code.push(printed);
        } else if !function.modifiers().is_empty() {
            modifiers.push(printed);
        } else {
            overrides.push(printed);
        }
    }

    let mut body = vec![
        print_using(&helpers),
        contract
            .variables()
            .iter()
            .map(|v| Lines::line(helpers.transform_variable(v)))
            .collect(),
        print_constructor(&helpers),
    ];
    body.extend(code);
    body.extend(modifiers);
    if !overrides.is_empty() {
        body.push(vec![Lines::line(OVERRIDES_COMMENT)]);
    }
    body.extend(overrides);

    let mut declaration: Vec<Lines> = contract
        .natspec_tags()
        .iter()
        .map(|tag| Lines::line(format!("/// {} {}", tag.key, tag.value)))
        .collect();
    declaration.push(Lines::line(print_header(&helpers)));
    declaration.push(Lines::Block(space_between(body)));
    declaration.push(Lines::line("}"));

    format_lines(&space_between(vec![
        vec![
            Lines::line(format!("// SPDX-License-Identifier: {}", contract.license())),
            Lines::line(format!("pragma solidity {SOLIDITY_VERSION};")),
        ],
        print_imports(&helpers),
        declaration,
    ]))
}

struct Helpers<'a> {
    contract: &'a Contract,
    transform_import: &'a dyn Fn(&str) -> String,
}

impl Helpers<'_> {
    fn upgradeable(&self) -> bool {
        self.contract.is_upgradeable()
    }

    fn transform_name(&self, name: &str) -> String {
        if self.upgradeable() {
            upgradeable_name(name)
        } else {
            name.to_string()
        }
    }

    fn transform_path(&self, path: &str) -> String {
        let path = if self.upgradeable() {
            upgradeable_path(path)
        } else {
            path.to_string()
        };
        (self.transform_import)(&path)
    }

    /// Rename library-qualified types such as `Counters.Counter`.
    fn transform_variable(&self, declaration: &str) -> String {
        if !self.upgradeable() {
            return declaration.to_string();
        }
        for using in self.contract.using() {
            let prefix = format!("{}.", using.library.name);
            if let Some(rest) = declaration.strip_prefix(&prefix) {
                return format!("{}.{}", upgradeable_name(&using.library.name), rest);
            }
        }
        declaration.to_string()
    }
}

/// Append `Upgradeable` to the leading identifier of a name, leaving
/// `Initializable` and already suffixed names alone.
fn upgradeable_name(name: &str) -> String {
    let (head, rest) = match name.find('.') {
        Some(i) => name.split_at(i),
        None => (name, ""),
    };
    if head == "Initializable" || head.ends_with("Upgradeable") {
        name.to_string()
    } else {
        format!("{head}Upgradeable{rest}")
    }
}

fn upgradeable_path(path: &str) -> String {
    let Some(rest) = path.strip_prefix(UPGRADEABLE_PATH_FROM) else {
        return path.to_string();
    };
    let (dir, file) = match rest.rfind('/') {
        Some(i) => rest.split_at(i + 1),
        None => ("", rest),
    };
    let file = match file.strip_suffix(".sol") {
        Some(stem) => format!("{}.sol", upgradeable_name(stem)),
        None => file.to_string(),
    };
    format!("{UPGRADEABLE_PATH_TO}{dir}{file}")
}

fn print_imports(helpers: &Helpers<'_>) -> Vec<Lines> {
    let mut seen = BTreeSet::new();
    helpers
        .contract
        .import_paths()
        .into_iter()
        .map(|path| helpers.transform_path(path))
        .filter(|path| seen.insert(path.clone()))
        .map(|path| Lines::line(format!("import \"{path}\";")))
        .collect()
}

fn print_header(helpers: &Helpers<'_>) -> String {
    let contract = helpers.contract;
    if contract.parents().is_empty() {
        format!("contract {} {{", contract.name())
    } else {
        let parents: Vec<String> = contract
            .parents()
            .iter()
            .map(|p| helpers.transform_name(&p.contract.name))
            .collect();
        format!("contract {} is {} {{", contract.name(), parents.join(", "))
    }
}

fn print_using(helpers: &Helpers<'_>) -> Vec<Lines> {
    helpers
        .contract
        .using()
        .iter()
        .map(|u| {
            Lines::line(format!(
                "using {} for {};",
                helpers.transform_name(&u.library.name),
                helpers.transform_name(&u.using_for)
            ))
        })
        .collect()
}

fn disable_initializers() -> Vec<Lines> {
    vec![
        Lines::line("/// @custom:oz-upgrades-unsafe-allow constructor"),
        Lines::line("constructor() {"),
        Lines::Block(vec![Lines::line("_disableInitializers();")]),
        Lines::line("}"),
    ]
}

fn print_constructor(helpers: &Helpers<'_>) -> Vec<Lines> {
    let contract = helpers.contract;
    let upgradeable = helpers.upgradeable();
    let initializable: Vec<&Parent> = contract
        .parents()
        .iter()
        .filter(|p| p.contract.name != "Initializable")
        .collect();
    let has_parent_params = contract.parents().iter().any(|p| !p.params.is_empty());
    let has_code = !contract.constructor_code().is_empty();

    if !(has_parent_params || has_code || (upgradeable && !initializable.is_empty())) {
        return if upgradeable {
            disable_initializers()
        } else {
            Vec::new()
        };
    }

    let parent_calls: Vec<String> = initializable
        .iter()
        .filter_map(|p| print_parent_constructor(p, upgradeable))
        .collect();
    let args: Vec<String> = contract
        .constructor_args()
        .iter()
        .map(|a| print_argument(a, helpers))
        .collect();
    let code: Vec<Lines> = contract
        .constructor_code()
        .iter()
        .map(|l| Lines::line(l.as_str()))
        .collect();

    if upgradeable {
        let body = space_between(vec![
            parent_calls.iter().map(|p| Lines::line(format!("{p};"))).collect(),
            code,
        ]);
        space_between(vec![
            disable_initializers(),
            print_function2(
                "function initialize".to_string(),
                args,
                vec!["initializer public".to_string()],
                body,
            ),
        ])
    } else {
        print_function2("constructor".to_string(), args, parent_calls, code)
    }
}

fn print_parent_constructor(parent: &Parent, upgradeable: bool) -> Option<String> {
    let params: Vec<String> = parent.params.iter().map(print_value).collect();
    if upgradeable {
        Some(format!("__{}_init({})", parent.contract.name, params.join(", ")))
    } else if !params.is_empty() {
        Some(format!("{}({})", parent.contract.name, params.join(", ")))
    } else {
        None
    }
}

/// Render a constructor argument value.
pub(crate) fn print_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Number(n) => n.to_string(),
        Value::Lit(lit) => lit.clone(),
        Value::Note { value, note } => format!("{} /* {} */", print_value(value), note),
    }
}

/// Quote a string as a Solidity (and JSON) string literal.
pub(crate) fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn print_argument(arg: &FunctionArgument, helpers: &Helpers<'_>) -> String {
    let ty = match &arg.ty {
        ArgType::Elementary(ty) => ty.clone(),
        ArgType::Contract(name) => helpers.transform_name(name),
    };
    format!("{} {}", ty, arg.name)
}

fn print_function(function: &ContractFunction, helpers: &Helpers<'_>) -> Vec<Lines> {
    let overrides = ordered_overrides(function, helpers.contract);
    if overrides.len() <= 1 && function.modifiers().is_empty() && !function.has_body() {
        return Vec::new();
    }

    let descriptor = function.descriptor();
    let mut modifiers = vec![descriptor.kind.to_string()];
    if function.mutability() != Mutability::NonPayable {
        modifiers.push(function.mutability().to_string());
    }
    modifiers.extend(function.modifiers().iter().cloned());
    match overrides.len() {
        0 => {}
        1 => modifiers.push("override".to_string()),
        _ => {
            let names: Vec<String> = overrides.iter().map(|o| helpers.transform_name(o)).collect();
            modifiers.push(format!("override({})", names.join(", ")));
        }
    }
    if !descriptor.returns.is_empty() {
        modifiers.push(format!("returns ({})", descriptor.returns.join(", ")));
    }

    let mut code: Vec<Lines> = function
        .guards()
        .iter()
        .map(|g| Lines::line(g.as_str()))
        .collect();
    match function.final_body() {
        Some(body) => code.extend(body.iter().map(|l| Lines::line(l.as_str()))),
        None => {
            code.extend(function.code().iter().map(|l| Lines::line(l.as_str())));
            if !overrides.is_empty() {
                let arg_names: Vec<&str> = if descriptor.passthrough_args {
                    descriptor.args.iter().map(|a| a.name.as_str()).collect()
                } else {
                    Vec::new()
                };
                let super_call = format!("super.{}({});", descriptor.name, arg_names.join(", "));
                code.push(Lines::line(if descriptor.returns.is_empty() {
                    super_call
                } else {
                    format!("return {super_call}")
                }));
            }
        }
    }

    let args = descriptor
        .args
        .iter()
        .map(|a| print_argument(a, helpers))
        .collect();
    print_function2(format!("function {}", descriptor.name), args, modifiers, code)
}

/// Override targets in inheritance order; unknown names sort last.
fn ordered_overrides<'f>(function: &'f ContractFunction, contract: &Contract) -> Vec<&'f str> {
    let mut overrides: Vec<&str> = function.overrides().iter().map(String::as_str).collect();
    overrides.sort_by_key(|name| contract.parent_index(name).unwrap_or(usize::MAX));
    overrides
}

fn print_function2(
    kinded_name: String,
    args: Vec<String>,
    modifiers: Vec<String>,
    code: Vec<Lines>,
) -> Vec<Lines> {
    let heading_length: usize = std::iter::once(&kinded_name)
        .chain(&args)
        .chain(&modifiers)
        .map(String::len)
        .sum();
    let braces = if code.is_empty() { "{}" } else { "{" };
    let head = format!("{}({})", kinded_name, args.join(", "));

    let mut out = Vec::new();
    if heading_length <= MAX_HEADING_LENGTH {
        let mut parts = vec![head];
        parts.extend(modifiers);
        parts.push(braces.to_string());
        out.push(Lines::Line(parts.join(" ")));
    } else {
        out.push(Lines::Line(head));
        out.push(Lines::Block(modifiers.into_iter().map(Lines::Line).collect()));
        out.push(Lines::line(braces));
    }
    if !code.is_empty() {
        out.push(Lines::Block(code));
        out.push(Lines::line("}"));
    }
    out
}
