//! Resolved, typed configuration of the S3 sink.
//!
//! [`S3SinkConfig`] is built once from a raw key/value map. Construction
//! validates every option against the schema and checks that each required
//! setting is present under at least one of its names. Getters then resolve
//! settings from the parsed values: the current name wins, the deprecated
//! name is consulted next, and a built-in default applies last.

use crate::keys::{PRECEDENCE_PAIRS, Setting, TIMESTAMP_SOURCE, TIMESTAMP_TIMEZONE, pair};
use crate::region::Region;
use crate::schema::build_schema;
use log::{debug, info};
use objsink_common::common::{CommonOptions, parse_output_fields};
use objsink_common::logging::{DEPRECATED_VARIABLE_MESSAGE, default_logger};
use objsink_common::timestamp::{TimestampSource, TimestampSourceType, Timezone};
use objsink_common::types::{
    CompressionType, OutputField, OutputFieldEncodingType, OutputFieldType, OutputFormat,
};
use objsink_common::{
    Bindings, ConfigDef, ConfigError, ConfigValue, ParsedConfig, Password, RawConfig,
    SharedLogger, Template,
};
use std::fmt;
use std::path::Path;

/// Prefix variables that used to be supported and now render as nothing.
pub const DEPRECATED_PREFIX_VARIABLES: [&str; 2] = ["utc_date", "local_date"];

/// Compression used when neither compression option is set.
pub const DEFAULT_COMPRESSION: CompressionType = CompressionType::Gzip;

/// Field encoding used when the encoding option is unset.
pub const DEFAULT_FIELD_ENCODING: OutputFieldEncodingType = OutputFieldEncodingType::Base64;

/// Immutable view over a validated S3 sink configuration.
#[derive(Clone)]
pub struct S3SinkConfig {
    parsed: ParsedConfig,
    logger: SharedLogger,
}

impl S3SinkConfig {
    /// Validate `raw` and report deprecations through the `log` facade.
    pub fn new(raw: &RawConfig) -> Result<Self, ConfigError> {
        Self::with_logger(raw, default_logger())
    }

    /// Validate `raw`, reporting deprecations through `logger`.
    pub fn with_logger(raw: &RawConfig, logger: SharedLogger) -> Result<Self, ConfigError> {
        let parsed = build_schema(&logger)?.parse(raw)?;
        for pair in PRECEDENCE_PAIRS.iter().filter(|p| p.required) {
            if parsed.get(pair.current).is_none() && parsed.get(pair.legacy).is_none() {
                return Err(ConfigError::MissingRequired {
                    current: pair.current.to_string(),
                    legacy: pair.legacy.to_string(),
                });
            }
        }
        debug!("S3 sink configuration values:\n{}", parsed.describe_values());
        let config = Self { parsed, logger };
        info!(
            "loaded S3 sink configuration (bucket={}, region={})",
            config.bucket_name().unwrap_or_default(),
            config.region()
        );
        Ok(config)
    }

    /// Load a JSON5 document and validate it.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::new(&RawConfig::load_from_path(path)?)
    }

    /// Schema of every option this sink understands.
    pub fn config_def() -> Result<ConfigDef, ConfigError> {
        build_schema(&default_logger())
    }

    /// Value of a setting and the name that supplied it.
    fn resolve(&self, setting: Setting) -> Option<(&'static str, &ConfigValue)> {
        let pair = pair(setting);
        self.parsed
            .get(pair.current)
            .map(|value| (pair.current, value))
            .or_else(|| self.parsed.get(pair.legacy).map(|value| (pair.legacy, value)))
    }

    fn resolve_str(&self, setting: Setting) -> Option<&str> {
        self.resolve(setting).and_then(|(_, value)| value.as_str())
    }

    fn resolve_password(&self, setting: Setting) -> Option<&Password> {
        self.resolve(setting).and_then(|(_, value)| value.as_password())
    }

    /// Always present once constructed.
    pub fn aws_access_key_id(&self) -> Option<&Password> {
        self.resolve_password(Setting::AccessKeyId)
    }

    /// Always present once constructed.
    pub fn aws_secret_key(&self) -> Option<&Password> {
        self.resolve_password(Setting::SecretAccessKey)
    }

    /// Always present once constructed.
    pub fn bucket_name(&self) -> Option<&str> {
        self.resolve_str(Setting::BucketName)
    }

    pub fn aws_endpoint(&self) -> Option<&str> {
        self.resolve_str(Setting::Endpoint)
    }

    /// Configured region, `us-east-1` when unset.
    pub fn region(&self) -> Region {
        self.resolve_str(Setting::Region)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Raw prefix pattern, empty when unset.
    pub fn prefix(&self) -> &str {
        self.resolve_str(Setting::Prefix).unwrap_or_default()
    }

    /// Parsed prefix pattern.
    pub fn prefix_template(&self) -> Result<Template, ConfigError> {
        let Some((name, value)) = self.resolve(Setting::Prefix) else {
            return Ok(Template::default());
        };
        let raw = value.as_str().unwrap_or_default();
        Template::parse(raw).map_err(|err| ConfigError::invalid(name, raw, err.to_string()))
    }

    /// Prefix with deprecated variables removed.
    ///
    /// Each occurrence of a deprecated variable reports a notice. Other
    /// variables are left in place for the writer to substitute.
    pub fn rendered_prefix(&self) -> Result<String, ConfigError> {
        let template = self.prefix_template()?;
        let bindings = DEPRECATED_PREFIX_VARIABLES
            .iter()
            .fold(Bindings::new(), |bindings, &name| {
                bindings.bind(name, move || {
                    self.logger.deprecated(name, DEPRECATED_VARIABLE_MESSAGE);
                    String::new()
                })
            });
        Ok(template.render(&bindings))
    }

    /// Configured compression, gzip when unset.
    pub fn compression_type(&self) -> CompressionType {
        self.resolve_str(Setting::Compression)
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_COMPRESSION)
    }

    /// Encoding applied to key and value fields, base64 when unset.
    pub fn output_field_encoding_type(&self) -> OutputFieldEncodingType {
        CommonOptions::new(&self.parsed)
            .output_field_encoding_type()
            .unwrap_or(DEFAULT_FIELD_ENCODING)
    }

    /// Fields written per record, a base64 value when unset.
    pub fn output_fields(&self) -> Result<Vec<OutputField>, ConfigError> {
        let encoding = self.output_field_encoding_type();
        match self.resolve(Setting::OutputFields) {
            Some((name, value)) => {
                parse_output_fields(name, value.as_list().unwrap_or_default(), encoding)
            }
            None => Ok(vec![OutputField::new(
                OutputFieldType::Value,
                OutputFieldEncodingType::Base64,
            )]),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        CommonOptions::new(&self.parsed).output_format()
    }

    /// Configured timezone, UTC when unset.
    pub fn timezone(&self) -> Timezone {
        self.parsed
            .get_string(TIMESTAMP_TIMEZONE)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Timestamp source in the configured timezone, wall clock when unset.
    pub fn timestamp_source(&self) -> TimestampSource {
        let source_type = self
            .parsed
            .get_string(TIMESTAMP_SOURCE)
            .and_then(|value| value.parse().ok())
            .unwrap_or(TimestampSourceType::Wallclock);
        TimestampSource::new(self.timezone(), source_type)
    }
}

impl fmt::Debug for S3SinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3SinkConfig")
            .field("parsed", &self.parsed)
            .finish_non_exhaustive()
    }
}
