//! Error types for contract building.
//!
//! [`OptionsError`] means the requested option combination cannot be
//! encoded and may be skipped by batch callers. [`InvariantError`] reports a
//! finished contract whose internal bookkeeping is inconsistent, which is a
//! feature-module bug and never skippable.

use std::collections::BTreeMap;

/// A requested option combination that a feature module cannot encode.
///
/// Carries one message per offending option field, keyed by the field's
/// camelCase name as it appears in serialized options.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid options: {}", render_messages(.messages))]
pub struct OptionsError {
    messages: BTreeMap<String, String>,
}

impl OptionsError {
    /// Create an error for a single field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut messages = BTreeMap::new();
        messages.insert(field.into(), message.into());
        Self { messages }
    }

    /// Add another field message.
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(field.into(), message.into());
        self
    }

    /// Message recorded for `field`, if any.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.messages.get(field).map(String::as_str)
    }

    /// All field messages, ordered by field name.
    pub fn messages(&self) -> &BTreeMap<String, String> {
        &self.messages
    }
}

fn render_messages(messages: &BTreeMap<String, String>) -> String {
    messages
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for build functions.
pub type BuildResult<T> = Result<T, OptionsError>;

/// Inconsistent contract state found after a build.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// A function lists an override target that was never added as a parent.
    #[error("function `{function}` of `{contract}` overrides `{parent}`, which is not a parent")]
    MissingOverrideTarget {
        contract: String,
        function: String,
        parent: String,
    },

    /// Two parents with the same name but different import paths.
    #[error("parent `{name}` of `{contract}` imported from both `{first}` and `{second}`")]
    ConflictingParentPath {
        contract: String,
        name: String,
        first: String,
        second: String,
    },
}
