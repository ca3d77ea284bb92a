//! Option names and the current/deprecated precedence table.
//!
//! Every logical setting that exists under two names is described once in
//! [`PRECEDENCE_PAIRS`]. The schema registers both names from the table and
//! the resolved configuration reads them back through it, current name
//! first.

use crate::region::Region;
use objsink_common::common::{FILE_COMPRESSION_TYPE_CONFIG, FORMAT_OUTPUT_FIELDS_CONFIG};
use objsink_common::types::CompressionType;
use objsink_common::validators::{
    NonEmptyPassword, NonEmptyString, OutputFieldsValidator, ParsesAs, TemplateValidator,
    UrlValidator, Validator, ValidatorExt,
};
use objsink_common::{ConfigType, Importance};
use std::sync::Arc;

pub const AWS_ACCESS_KEY_ID_CONFIG: &str = "aws.access.key.id";
pub const AWS_SECRET_ACCESS_KEY_CONFIG: &str = "aws.secret.access.key";
pub const AWS_S3_BUCKET_NAME_CONFIG: &str = "aws.s3.bucket.name";
pub const AWS_S3_ENDPOINT_CONFIG: &str = "aws.s3.endpoint";
pub const AWS_S3_PREFIX_CONFIG: &str = "aws.s3.prefix";
pub const AWS_S3_REGION_CONFIG: &str = "aws.s3.region";

pub const TIMESTAMP_TIMEZONE: &str = "timestamp.timezone";
pub const TIMESTAMP_SOURCE: &str = "timestamp.source";

// Deprecated names, still accepted.
pub const AWS_ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const AWS_SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const AWS_S3_BUCKET: &str = "aws_s3_bucket";
pub const AWS_S3_ENDPOINT: &str = "aws_s3_endpoint";
pub const AWS_S3_REGION: &str = "aws_s3_region";
pub const AWS_S3_PREFIX: &str = "aws_s3_prefix";
pub const OUTPUT_FIELDS: &str = "output_fields";
pub const OUTPUT_COMPRESSION: &str = "output_compression";

/// Logical settings that can be supplied under either generation of names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    AccessKeyId,
    SecretAccessKey,
    BucketName,
    Endpoint,
    Region,
    Prefix,
    OutputFields,
    Compression,
}

/// Which schema registers the current name of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Registered by this connector.
    Connector,
    /// Registered by the shared sink options.
    Common,
}

/// Domain rule applied to both names of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Secret,
    NonEmpty,
    Url,
    Region,
    Prefix,
    OutputFields,
    Compression,
}

impl Rule {
    /// Build the validator for this rule.
    pub fn validator(self) -> Arc<dyn Validator> {
        match self {
            Self::Secret => Arc::new(NonEmptyPassword),
            Self::NonEmpty => Arc::new(NonEmptyString),
            Self::Url => Arc::new(UrlValidator),
            Self::Region => Arc::new(ParsesAs::<Region>::new()),
            Self::Prefix => Arc::new(NonEmptyString.and(TemplateValidator)),
            Self::OutputFields => Arc::new(OutputFieldsValidator),
            Self::Compression => Arc::new(ParsesAs::<CompressionType>::new()),
        }
    }
}

/// One logical setting with its current and deprecated names.
#[derive(Debug, Clone, Copy)]
pub struct PrecedencePair {
    pub setting: Setting,
    pub current: &'static str,
    pub legacy: &'static str,
    pub config_type: ConfigType,
    pub rule: Rule,
    pub importance: Importance,
    /// Construction fails when neither name is set.
    pub required: bool,
    pub owner: Owner,
    pub documentation: &'static str,
}

pub static PRECEDENCE_PAIRS: [PrecedencePair; 8] = [
    PrecedencePair {
        setting: Setting::AccessKeyId,
        current: AWS_ACCESS_KEY_ID_CONFIG,
        legacy: AWS_ACCESS_KEY_ID,
        config_type: ConfigType::Password,
        rule: Rule::Secret,
        importance: Importance::Medium,
        required: true,
        owner: Owner::Connector,
        documentation: "AWS Access Key ID",
    },
    PrecedencePair {
        setting: Setting::SecretAccessKey,
        current: AWS_SECRET_ACCESS_KEY_CONFIG,
        legacy: AWS_SECRET_ACCESS_KEY,
        config_type: ConfigType::Password,
        rule: Rule::Secret,
        importance: Importance::Medium,
        required: true,
        owner: Owner::Connector,
        documentation: "AWS Secret Access Key",
    },
    PrecedencePair {
        setting: Setting::BucketName,
        current: AWS_S3_BUCKET_NAME_CONFIG,
        legacy: AWS_S3_BUCKET,
        config_type: ConfigType::String,
        rule: Rule::NonEmpty,
        importance: Importance::Medium,
        required: true,
        owner: Owner::Connector,
        documentation: "AWS S3 Bucket name",
    },
    PrecedencePair {
        setting: Setting::Endpoint,
        current: AWS_S3_ENDPOINT_CONFIG,
        legacy: AWS_S3_ENDPOINT,
        config_type: ConfigType::String,
        rule: Rule::Url,
        importance: Importance::Low,
        required: false,
        owner: Owner::Connector,
        documentation: "Explicit AWS S3 Endpoint Address, mainly for testing",
    },
    PrecedencePair {
        setting: Setting::Region,
        current: AWS_S3_REGION_CONFIG,
        legacy: AWS_S3_REGION,
        config_type: ConfigType::String,
        rule: Rule::Region,
        importance: Importance::Medium,
        required: false,
        owner: Owner::Connector,
        documentation: "AWS S3 Region, e.g. us-east-1",
    },
    PrecedencePair {
        setting: Setting::Prefix,
        current: AWS_S3_PREFIX_CONFIG,
        legacy: AWS_S3_PREFIX,
        config_type: ConfigType::String,
        rule: Rule::Prefix,
        importance: Importance::Medium,
        required: false,
        owner: Owner::Connector,
        documentation: "Prefix for stored objects, e.g. cluster-1/",
    },
    PrecedencePair {
        setting: Setting::OutputFields,
        current: FORMAT_OUTPUT_FIELDS_CONFIG,
        legacy: OUTPUT_FIELDS,
        config_type: ConfigType::List,
        rule: Rule::OutputFields,
        importance: Importance::Medium,
        required: false,
        owner: Owner::Common,
        documentation: "Output fields. A comma separated list of one or more: \
                        key, offset, timestamp, value",
    },
    PrecedencePair {
        setting: Setting::Compression,
        current: FILE_COMPRESSION_TYPE_CONFIG,
        legacy: OUTPUT_COMPRESSION,
        config_type: ConfigType::String,
        rule: Rule::Compression,
        importance: Importance::Medium,
        required: false,
        owner: Owner::Common,
        documentation: "Output compression. Valid values are: none, gzip, snappy, zstd",
    },
];

/// Table entry for a setting. Entries are stored in `Setting` order.
pub fn pair(setting: Setting) -> &'static PrecedencePair {
    &PRECEDENCE_PAIRS[setting as usize]
}
