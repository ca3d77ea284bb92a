//! Error types for option validation and configuration resolution.

use thiserror::Error;

/// Errors returned while loading, validating or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A supplied value failed the domain rule of its option.
    #[error("invalid value {value} for configuration {name}: {message}")]
    InvalidValue {
        /// Offending option name.
        name: String,
        /// Rendered value; secrets are rendered as `[hidden]`.
        value: String,
        /// Rule that was violated, including accepted values where relevant.
        message: String,
    },
    /// Neither the current nor the deprecated key of a mandatory setting was set.
    #[error("Neither {current} nor {legacy} properties have been set")]
    MissingRequired { current: String, legacy: String },
    /// The same option name was registered twice.
    #[error("configuration {0} is defined twice")]
    DuplicateOption(String),
    /// Reading a configuration file failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// Parsing a configuration document failed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[from] json5::Error),
    /// The document parsed but does not have the expected shape.
    #[error("failed to decode config: {0}")]
    DecodeFailed(String),
}

impl ConfigError {
    /// Build an [`ConfigError::InvalidValue`] for the given option.
    pub fn invalid(
        name: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Name of the option this error refers to, when there is a single one.
    pub fn option_name(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { name, .. } | Self::DuplicateOption(name) => Some(name),
            _ => None,
        }
    }
}
