//! Closed value sets shared by sink connectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string outside a closed set of accepted values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("supported values are: {supported}")]
pub struct UnsupportedValue {
    /// The rejected input.
    pub value: String,
    /// Comma separated list of accepted values.
    pub supported: String,
}

/// Look up a variant by name, ignoring ASCII case.
pub fn lookup_variant<T: Copy>(
    value: &str,
    variants: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, UnsupportedValue> {
    variants
        .iter()
        .copied()
        .find(|variant| name(*variant).eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| unsupported(value, variants, &name))
}

/// Look up a variant whose name matches `value` exactly.
pub fn lookup_variant_exact<T: Copy>(
    value: &str,
    variants: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, UnsupportedValue> {
    variants
        .iter()
        .copied()
        .find(|variant| name(*variant) == value)
        .ok_or_else(|| unsupported(value, variants, &name))
}

fn unsupported<T: Copy>(
    value: &str,
    variants: &[T],
    name: &impl Fn(T) -> &'static str,
) -> UnsupportedValue {
    UnsupportedValue {
        value: value.to_string(),
        supported: variants
            .iter()
            .map(|variant| name(*variant))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Compression applied to written objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionType {
    None,
    Gzip,
    Snappy,
    Zstd,
}

impl CompressionType {
    pub const ALL: [Self; 4] = [Self::None, Self::Gzip, Self::Snappy, Self::Zstd];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Snappy => "snappy",
            Self::Zstd => "zstd",
        }
    }

    /// File name suffix for objects written with this compression.
    pub fn extension(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Gzip => ".gz",
            Self::Snappy => ".snappy",
            Self::Zstd => ".zst",
        }
    }
}

impl FromStr for CompressionType {
    type Err = UnsupportedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_variant(s, &Self::ALL, Self::name)
    }
}

impl fmt::Display for CompressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record component written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFieldType {
    Key,
    Offset,
    Timestamp,
    Value,
}

impl OutputFieldType {
    pub const ALL: [Self; 4] = [Self::Key, Self::Offset, Self::Timestamp, Self::Value];

    pub fn name(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Offset => "offset",
            Self::Timestamp => "timestamp",
            Self::Value => "value",
        }
    }

    /// Only key and value carry a configurable encoding.
    pub fn is_encodable(self) -> bool {
        matches!(self, Self::Key | Self::Value)
    }
}

impl FromStr for OutputFieldType {
    type Err = UnsupportedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_variant(s, &Self::ALL, Self::name)
    }
}

impl fmt::Display for OutputFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoding of binary key/value fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFieldEncodingType {
    None,
    Base64,
}

impl OutputFieldEncodingType {
    pub const ALL: [Self; 2] = [Self::None, Self::Base64];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Base64 => "base64",
        }
    }
}

impl FromStr for OutputFieldEncodingType {
    type Err = UnsupportedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_variant(s, &Self::ALL, Self::name)
    }
}

impl fmt::Display for OutputFieldEncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A selected record component together with its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputField {
    pub field_type: OutputFieldType,
    pub encoding: OutputFieldEncodingType,
}

impl OutputField {
    pub fn new(field_type: OutputFieldType, encoding: OutputFieldEncodingType) -> Self {
        Self {
            field_type,
            encoding,
        }
    }

    /// Pair a field with `encoding` if it is encodable, otherwise with none.
    pub fn with_configured_encoding(
        field_type: OutputFieldType,
        encoding: OutputFieldEncodingType,
    ) -> Self {
        let encoding = if field_type.is_encodable() {
            encoding
        } else {
            OutputFieldEncodingType::None
        };
        Self::new(field_type, encoding)
    }
}

/// Layout of written objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Jsonl,
    Parquet,
}

impl OutputFormat {
    pub const ALL: [Self; 4] = [Self::Csv, Self::Json, Self::Jsonl, Self::Parquet];

    pub fn name(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Jsonl => "jsonl",
            Self::Parquet => "parquet",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnsupportedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_variant(s, &Self::ALL, Self::name)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
