//! Typed option values produced by schema parsing.

use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::fmt;

/// Rendering used for secret values in logs, errors and docs.
pub const HIDDEN: &str = "[hidden]";

/// Secret option value. Never printed by `Debug` or `Display`.
#[derive(Clone)]
pub struct Password(SecretString);

impl Password {
    /// Wrap a secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::new(value.into()))
    }

    /// Expose the secret for handing to the storage client.
    pub fn value(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HIDDEN)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HIDDEN)
    }
}

/// Converted value of a single option.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Password(Password),
    List(Vec<String>),
}

impl ConfigValue {
    /// String contents, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Secret contents, if this is a password value.
    pub fn as_password(&self) -> Option<&Password> {
        match self {
            Self::Password(value) => Some(value),
            _ => None,
        }
    }

    /// List entries, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(value) => Some(value),
            _ => None,
        }
    }

    /// Rendering safe for logs and error messages.
    pub fn rendered(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::Password(_) => HIDDEN.to_string(),
            Self::List(values) => values.join(","),
        }
    }
}

/// Result of loading a raw configuration against a schema.
///
/// Holds one entry per declared option; `None` means the option was neither
/// supplied nor defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedConfig {
    values: BTreeMap<String, Option<ConfigValue>>,
}

impl ParsedConfig {
    pub(crate) fn new(values: BTreeMap<String, Option<ConfigValue>>) -> Self {
        Self { values }
    }

    /// Whether the schema declared this option.
    pub fn is_declared(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Value of an option, `None` when unset or undeclared.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ConfigValue::as_str)
    }

    pub fn get_password(&self, name: &str) -> Option<&Password> {
        self.get(name).and_then(ConfigValue::as_password)
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(ConfigValue::as_list)
    }

    /// One `name = value` line per declared option with secrets hidden.
    pub fn describe_values(&self) -> String {
        self.values
            .iter()
            .map(|(name, value)| {
                let rendered = value
                    .as_ref()
                    .map(ConfigValue::rendered)
                    .unwrap_or_else(|| "null".to_string());
                format!("\t{name} = {rendered}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
