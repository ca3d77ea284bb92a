//! Option schema: declared keys, type conversion and load-time validation.
//!
//! A [`ConfigDef`] holds every option a connector understands. Parsing a
//! [`RawConfig`] against it converts each declared option to its type,
//! applies declared defaults and runs the option's validator. Keys the
//! schema does not declare are ignored, since hosts pass unrelated keys.

mod raw;
mod value;

#[cfg(test)]
mod tests;

pub use raw::RawConfig;
pub use value::{ConfigValue, HIDDEN, ParsedConfig, Password};

use crate::ConfigError;
use crate::validators::Validator;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Value type of a declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigType {
    /// Plain string.
    String,
    /// Secret string, never rendered in logs or errors.
    Password,
    /// Comma separated list of strings.
    List,
}

impl ConfigType {
    /// Name used in schema documentation.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Password => "PASSWORD",
            Self::List => "LIST",
        }
    }

    /// Convert a raw string into a value of this type.
    pub fn convert(self, raw: &str) -> ConfigValue {
        match self {
            Self::String => ConfigValue::String(raw.trim().to_string()),
            Self::Password => ConfigValue::Password(Password::new(raw)),
            Self::List => ConfigValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
}

/// How prominently an option is documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    /// Name used in schema documentation.
    pub fn name(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// A single declared option.
#[derive(Clone)]
pub struct ConfigKey {
    pub name: String,
    pub config_type: ConfigType,
    pub default: Option<String>,
    pub validator: Option<Arc<dyn Validator>>,
    pub importance: Importance,
    pub documentation: String,
}

impl ConfigKey {
    /// Declare an option without default or validator.
    pub fn new(
        name: impl Into<String>,
        config_type: ConfigType,
        importance: Importance,
        documentation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            config_type,
            default: None,
            validator: None,
            importance,
            documentation: documentation.into(),
        }
    }

    /// Set the raw default applied when the key is absent.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Attach the validator run at load time.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Attach an already shared validator.
    pub fn with_shared_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Convert and validate the raw value (or the default) of this option.
    fn load(&self, raw: &RawConfig) -> Result<Option<ConfigValue>, ConfigError> {
        let value = raw
            .get(&self.name)
            .or(self.default.as_deref())
            .map(|raw| self.config_type.convert(raw));
        if let Some(validator) = &self.validator {
            validator.ensure_valid(&self.name, value.as_ref())?;
        }
        Ok(value)
    }
}

impl fmt::Debug for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigKey")
            .field("name", &self.name)
            .field("config_type", &self.config_type)
            .field("default", &self.default)
            .field("importance", &self.importance)
            .finish_non_exhaustive()
    }
}

/// Set of declared options a raw configuration is loaded against.
#[derive(Debug, Clone, Default)]
pub struct ConfigDef {
    keys: Vec<ConfigKey>,
}

impl ConfigDef {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option; names must be unique.
    pub fn define(&mut self, key: ConfigKey) -> Result<&mut Self, ConfigError> {
        if self.get(&key.name).is_some() {
            return Err(ConfigError::DuplicateOption(key.name));
        }
        self.keys.push(key);
        Ok(self)
    }

    /// Look up a declared option by name.
    pub fn get(&self, name: &str) -> Option<&ConfigKey> {
        self.keys.iter().find(|key| key.name == name)
    }

    /// Declared option names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|key| key.name.as_str())
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no option has been declared.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Load every declared option, failing on the first invalid value.
    pub fn parse(&self, raw: &RawConfig) -> Result<ParsedConfig, ConfigError> {
        let mut values = BTreeMap::new();
        for key in &self.keys {
            values.insert(key.name.clone(), key.load(raw)?);
        }
        let ignored = raw.keys().filter(|name| self.get(name).is_none()).count();
        debug!(
            "parsed configuration (declared={}, ignored={ignored})",
            self.keys.len()
        );
        Ok(ParsedConfig::new(values))
    }

    /// Validate every declared option and collect all failures.
    pub fn validate_all(&self, raw: &RawConfig) -> Vec<ConfigError> {
        self.keys
            .iter()
            .filter_map(|key| key.load(raw).err())
            .collect()
    }

    /// Render a documentation table of the declared options, sorted by
    /// importance and then name.
    pub fn describe(&self) -> String {
        let mut keys: Vec<&ConfigKey> = self.keys.iter().collect();
        keys.sort_by(|a, b| {
            a.importance
                .cmp(&b.importance)
                .then_with(|| a.name.cmp(&b.name))
        });
        let mut out = String::from("| Name | Type | Default | Importance | Description |\n");
        out.push_str("|---|---|---|---|---|\n");
        for key in keys {
            let default = match (&key.default, key.config_type) {
                (Some(_), ConfigType::Password) => HIDDEN.to_string(),
                (Some(default), _) => format!("`{default}`"),
                (None, _) => "null".to_string(),
            };
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                key.name,
                key.config_type.name(),
                default,
                key.importance.name(),
                key.documentation
            ));
        }
        out
    }
}
