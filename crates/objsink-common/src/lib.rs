//! Shared configuration building blocks for object-storage sink connectors.
//!
//! This crate owns the option schema mechanism, the validator set, the closed
//! value types shared by sinks, and the path template engine. Connector
//! crates register their own options on top of the common ones.

pub mod common;
pub mod def;
mod error;
pub mod logging;
pub mod templating;
pub mod timestamp;
pub mod types;
pub mod validators;

/// Public error type returned by validation and resolution APIs.
pub use error::ConfigError;
/// Schema and value types.
pub use def::{
    ConfigDef, ConfigKey, ConfigType, ConfigValue, Importance, ParsedConfig, Password, RawConfig,
};
/// Logging collaborator.
pub use logging::{ConfigLogger, SharedLogger};
/// Path templates.
pub use templating::{Bindings, Template, TemplateError, UnboundVariable};
