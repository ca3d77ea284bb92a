//! Options shared by every sink connector and their typed accessors.
//!
//! Connectors register these keys through the `add_*` helpers and read them
//! back through [`CommonOptions`]. Values are validated at parse time, so
//! accessors only see well-formed input.

use crate::def::{ConfigDef, ConfigKey, ConfigType, Importance, ParsedConfig};
use crate::types::{
    CompressionType, OutputField, OutputFieldEncodingType, OutputFieldType, OutputFormat,
};
use crate::validators::{OutputFieldsValidator, ParsesAs};
use crate::ConfigError;

pub const FILE_COMPRESSION_TYPE_CONFIG: &str = "file.compression.type";
pub const FORMAT_OUTPUT_FIELDS_CONFIG: &str = "format.output.fields";
pub const FORMAT_OUTPUT_FIELDS_VALUE_ENCODING_CONFIG: &str = "format.output.fields.value.encoding";
pub const FORMAT_OUTPUT_TYPE_CONFIG: &str = "format.output.type";

/// Register the compression option, optionally with a default.
pub fn add_compression_type_config(
    def: &mut ConfigDef,
    default: Option<CompressionType>,
) -> Result<(), ConfigError> {
    let mut key = ConfigKey::new(
        FILE_COMPRESSION_TYPE_CONFIG,
        ConfigType::String,
        Importance::Medium,
        format!(
            "The compression type used for files put on the object store. \
             The supported values are: {}.",
            supported(&CompressionType::ALL, CompressionType::name)
        ),
    )
    .with_validator(ParsesAs::<CompressionType>::new());
    if let Some(default) = default {
        key = key.with_default(default.name());
    }
    def.define(key)?;
    Ok(())
}

/// Register the output format, output fields and field encoding options.
pub fn add_output_fields_format_config_group(
    def: &mut ConfigDef,
    default_field: Option<OutputFieldType>,
) -> Result<(), ConfigError> {
    def.define(
        ConfigKey::new(
            FORMAT_OUTPUT_TYPE_CONFIG,
            ConfigType::String,
            Importance::Medium,
            format!(
                "The format type of output content. The supported values are: {}.",
                supported(&OutputFormat::ALL, OutputFormat::name)
            ),
        )
        .with_default(OutputFormat::Csv.name())
        .with_validator(ParsesAs::<OutputFormat>::new()),
    )?;

    let mut fields = ConfigKey::new(
        FORMAT_OUTPUT_FIELDS_CONFIG,
        ConfigType::List,
        Importance::Medium,
        format!(
            "Fields to put into output files. The supported values are: {}.",
            supported(&OutputFieldType::ALL, OutputFieldType::name)
        ),
    )
    .with_validator(OutputFieldsValidator);
    if let Some(default) = default_field {
        fields = fields.with_default(default.name());
    }
    def.define(fields)?;

    def.define(
        ConfigKey::new(
            FORMAT_OUTPUT_FIELDS_VALUE_ENCODING_CONFIG,
            ConfigType::String,
            Importance::Medium,
            format!(
                "The type of encoding for the value field. The supported values are: {}.",
                supported(&OutputFieldEncodingType::ALL, OutputFieldEncodingType::name)
            ),
        )
        .with_validator(ParsesAs::<OutputFieldEncodingType>::new()),
    )?;
    Ok(())
}

/// Pair every listed field with its encoding.
///
/// Fails when the list is empty or names an unknown field; `name` is the
/// option the list was read from.
pub fn parse_output_fields(
    name: &str,
    names: &[String],
    encoding: OutputFieldEncodingType,
) -> Result<Vec<OutputField>, ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::invalid(name, "", "cannot be empty"));
    }
    names
        .iter()
        .map(|entry| {
            entry
                .parse::<OutputFieldType>()
                .map(|field_type| OutputField::with_configured_encoding(field_type, encoding))
                .map_err(|err| ConfigError::invalid(name, names.join(","), err.to_string()))
        })
        .collect()
}

/// Typed read access to the common options of a parsed configuration.
#[derive(Debug, Clone, Copy)]
pub struct CommonOptions<'a> {
    parsed: &'a ParsedConfig,
}

impl<'a> CommonOptions<'a> {
    pub fn new(parsed: &'a ParsedConfig) -> Self {
        Self { parsed }
    }

    /// Configured compression, if set.
    pub fn compression_type(&self) -> Option<CompressionType> {
        self.parsed
            .get_string(FILE_COMPRESSION_TYPE_CONFIG)
            .and_then(|value| value.parse().ok())
    }

    /// Configured field encoding, if set.
    pub fn output_field_encoding_type(&self) -> Option<OutputFieldEncodingType> {
        self.parsed
            .get_string(FORMAT_OUTPUT_FIELDS_VALUE_ENCODING_CONFIG)
            .and_then(|value| value.parse().ok())
    }

    /// Configured output fields paired with `encoding`, if set.
    pub fn output_fields(
        &self,
        encoding: OutputFieldEncodingType,
    ) -> Result<Option<Vec<OutputField>>, ConfigError> {
        self.parsed
            .get_list(FORMAT_OUTPUT_FIELDS_CONFIG)
            .map(|names| parse_output_fields(FORMAT_OUTPUT_FIELDS_CONFIG, names, encoding))
            .transpose()
    }

    /// Configured output format, csv when unset.
    pub fn output_format(&self) -> OutputFormat {
        self.parsed
            .get_string(FORMAT_OUTPUT_TYPE_CONFIG)
            .and_then(|value| value.parse().ok())
            .unwrap_or(OutputFormat::Csv)
    }
}

fn supported<T: Copy>(variants: &[T], name: fn(T) -> &'static str) -> String {
    variants
        .iter()
        .map(|variant| name(*variant))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::RawConfig;
    use pretty_assertions::assert_eq;

    fn common_def() -> ConfigDef {
        let mut def = ConfigDef::new();
        add_compression_type_config(&mut def, None).expect("compression");
        add_output_fields_format_config_group(&mut def, None).expect("fields");
        def
    }

    #[test]
    fn unset_common_options_resolve_to_none() {
        let parsed = common_def().parse(&RawConfig::new()).expect("parse");
        let options = CommonOptions::new(&parsed);
        assert_eq!(options.compression_type(), None);
        assert_eq!(options.output_field_encoding_type(), None);
        assert_eq!(
            options
                .output_fields(OutputFieldEncodingType::Base64)
                .expect("fields"),
            None
        );
        assert_eq!(options.output_format(), OutputFormat::Csv);
    }

    #[test]
    fn set_common_options_are_typed() {
        let raw = RawConfig::new()
            .with(FILE_COMPRESSION_TYPE_CONFIG, "zstd")
            .with(FORMAT_OUTPUT_FIELDS_CONFIG, "key, offset")
            .with(FORMAT_OUTPUT_FIELDS_VALUE_ENCODING_CONFIG, "none")
            .with(FORMAT_OUTPUT_TYPE_CONFIG, "jsonl");
        let parsed = common_def().parse(&raw).expect("parse");
        let options = CommonOptions::new(&parsed);
        assert_eq!(options.compression_type(), Some(CompressionType::Zstd));
        assert_eq!(
            options
                .output_fields(OutputFieldEncodingType::Base64)
                .expect("fields"),
            Some(vec![
                OutputField::new(OutputFieldType::Key, OutputFieldEncodingType::Base64),
                OutputField::new(OutputFieldType::Offset, OutputFieldEncodingType::None),
            ])
        );
        assert_eq!(options.output_format(), OutputFormat::Jsonl);
    }

    #[test]
    fn defaults_are_registered_when_given() {
        let mut def = ConfigDef::new();
        add_compression_type_config(&mut def, Some(CompressionType::Gzip)).expect("compression");
        let parsed = def.parse(&RawConfig::new()).expect("parse");
        assert_eq!(
            CommonOptions::new(&parsed).compression_type(),
            Some(CompressionType::Gzip)
        );
    }

    #[test]
    fn parse_output_fields_rejects_empty_and_unknown_lists() {
        let err = parse_output_fields("fields", &[], OutputFieldEncodingType::Base64).unwrap_err();
        assert_eq!(err.option_name(), Some("fields"));
        assert!(err.to_string().contains("cannot be empty"));

        let names = vec!["key".to_string(), "headers".to_string()];
        let err =
            parse_output_fields("fields", &names, OutputFieldEncodingType::Base64).unwrap_err();
        assert!(err.to_string().contains("invalid value key,headers"));
    }
}
