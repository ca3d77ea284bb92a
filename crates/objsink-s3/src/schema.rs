//! Option schema of the S3 sink.

use crate::keys::{Owner, PRECEDENCE_PAIRS, TIMESTAMP_SOURCE, TIMESTAMP_TIMEZONE};
use objsink_common::common::{add_compression_type_config, add_output_fields_format_config_group};
use objsink_common::timestamp::{TimestampSourceType, Timezone};
use objsink_common::validators::{ParsesAs, ValidatorExt};
use objsink_common::{ConfigDef, ConfigError, ConfigKey, ConfigType, Importance, SharedLogger};

/// Build the schema holding every current and deprecated option.
///
/// Deprecated options share the rule of their current counterpart and
/// report their use through `logger`. None of the paired options carries a
/// default: defaults are applied when a pair is resolved, so an unset
/// deprecated option never produces a notice.
pub fn build_schema(logger: &SharedLogger) -> Result<ConfigDef, ConfigError> {
    let mut def = ConfigDef::new();

    for pair in PRECEDENCE_PAIRS.iter().filter(|p| p.owner == Owner::Connector) {
        def.define(
            ConfigKey::new(pair.current, pair.config_type, pair.importance, pair.documentation)
                .with_shared_validator(pair.rule.validator()),
        )?;
    }

    add_compression_type_config(&mut def, None)?;
    add_output_fields_format_config_group(&mut def, None)?;
    add_timestamp_config(&mut def)?;

    for pair in &PRECEDENCE_PAIRS {
        def.define(
            ConfigKey::new(
                pair.legacy,
                pair.config_type,
                pair.importance,
                format!("{} Deprecated, use {}.", pair.documentation, pair.current),
            )
            .with_validator(pair.rule.validator().deprecated(logger.clone())),
        )?;
    }
    Ok(def)
}

fn add_timestamp_config(def: &mut ConfigDef) -> Result<(), ConfigError> {
    def.define(
        ConfigKey::new(
            TIMESTAMP_TIMEZONE,
            ConfigType::String,
            Importance::Low,
            "Timezone used for time based naming, e.g. UTC or Europe/Helsinki",
        )
        .with_default("UTC")
        .with_validator(ParsesAs::<Timezone>::new()),
    )?;
    def.define(
        ConfigKey::new(
            TIMESTAMP_SOURCE,
            ConfigType::String,
            Importance::Low,
            "Timestamp source used for time based naming: wallclock or event",
        )
        .with_default(TimestampSourceType::Wallclock.name())
        .with_validator(ParsesAs::<TimestampSourceType>::new()),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{AWS_S3_BUCKET, AWS_S3_REGION_CONFIG, OUTPUT_COMPRESSION};
    use objsink_common::RawConfig;
    use objsink_common::common::{FILE_COMPRESSION_TYPE_CONFIG, FORMAT_OUTPUT_TYPE_CONFIG};
    use objsink_common::logging::default_logger;
    use pretty_assertions::assert_eq;

    fn schema() -> ConfigDef {
        build_schema(&default_logger()).expect("schema")
    }

    #[test]
    fn registers_both_generations() {
        let def = schema();
        for pair in &PRECEDENCE_PAIRS {
            assert!(def.get(pair.current).is_some(), "{}", pair.current);
            assert!(def.get(pair.legacy).is_some(), "{}", pair.legacy);
        }
        assert!(def.get(TIMESTAMP_TIMEZONE).is_some());
        assert!(def.get(FORMAT_OUTPUT_TYPE_CONFIG).is_some());
        assert_eq!(def.len(), 2 * PRECEDENCE_PAIRS.len() + 4);
    }

    #[test]
    fn paired_options_have_no_schema_default() {
        let def = schema();
        for pair in &PRECEDENCE_PAIRS {
            assert_eq!(def.get(pair.current).and_then(|k| k.default.clone()), None);
            assert_eq!(def.get(pair.legacy).and_then(|k| k.default.clone()), None);
        }
        assert_eq!(
            def.get(TIMESTAMP_SOURCE).and_then(|k| k.default.clone()),
            Some("wallclock".to_string())
        );
    }

    #[test]
    fn legacy_options_share_the_current_rule() {
        let def = schema();
        let err = def
            .parse(&RawConfig::new().with(OUTPUT_COMPRESSION, "lzma"))
            .unwrap_err();
        assert_eq!(err.option_name(), Some(OUTPUT_COMPRESSION));
        let err = def
            .parse(&RawConfig::new().with(FILE_COMPRESSION_TYPE_CONFIG, "lzma"))
            .unwrap_err();
        assert_eq!(err.option_name(), Some(FILE_COMPRESSION_TYPE_CONFIG));
        let err = def
            .parse(&RawConfig::new().with(AWS_S3_BUCKET, " "))
            .unwrap_err();
        assert_eq!(err.option_name(), Some(AWS_S3_BUCKET));
    }

    #[test]
    fn describe_documents_deprecations() {
        let table = schema().describe();
        assert!(table.contains(&format!("Deprecated, use {AWS_S3_REGION_CONFIG}.")));
        assert!(table.contains("| aws.access.key.id | PASSWORD | null | MEDIUM |"));
    }
}
