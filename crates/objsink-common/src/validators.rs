//! Load-time validators for individual options.
//!
//! Every validator accepts an absent value; required-ness of a setting is
//! checked by whoever resolves it. Validators compose through
//! [`ValidatorExt`]: `and` chains two rules and `deprecated` wraps a rule
//! with a warn-then-delegate notice.

use crate::def::{ConfigValue, HIDDEN};
use crate::logging::{DEPRECATED_OPTION_MESSAGE, SharedLogger};
use crate::templating::Template;
use crate::common::parse_output_fields;
use crate::types::OutputFieldEncodingType;
use crate::ConfigError;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;
use url::Url;

/// A rule checked against a single option value at load time.
pub trait Validator: Send + Sync {
    /// Fail with [`ConfigError::InvalidValue`] when a present value breaks the rule.
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError>;
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        (**self).ensure_valid(name, value)
    }
}

/// Combinators available on every validator.
pub trait ValidatorExt: Validator + Sized {
    /// Run `self`, then `next`.
    fn and<V: Validator>(self, next: V) -> Chain<Self, V> {
        Chain(self, next)
    }

    /// Log a deprecation notice for present values before delegating.
    fn deprecated(self, logger: SharedLogger) -> Deprecated<Self> {
        Deprecated {
            inner: self,
            logger,
        }
    }
}

impl<V: Validator + Sized> ValidatorExt for V {}

/// Rejects empty or blank secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyPassword;

impl Validator for NonEmptyPassword {
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        match value {
            None => Ok(()),
            Some(ConfigValue::Password(secret)) if secret.value().trim().is_empty() => Err(
                ConfigError::invalid(name, HIDDEN, "Password must be non-empty"),
            ),
            Some(ConfigValue::Password(_)) => Ok(()),
            Some(other) => Err(type_mismatch(name, other, "password")),
        }
    }
}

/// Rejects empty or blank strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyString;

impl Validator for NonEmptyString {
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        let Some(value) = expect_str(name, value)? else {
            return Ok(());
        };
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(
                name,
                value,
                "String must be non-empty",
            ));
        }
        Ok(())
    }
}

/// Rejects strings that are not absolute `http`/`https` URLs with a host.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlValidator;

impl Validator for UrlValidator {
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        let Some(value) = expect_str(name, value)? else {
            return Ok(());
        };
        let url = Url::parse(value)
            .map_err(|err| ConfigError::invalid(name, value, format!("should be valid URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            return Err(ConfigError::invalid(
                name,
                value,
                "should be valid URL: expected http(s)://host[:port]",
            ));
        }
        Ok(())
    }
}

/// Accepts strings that parse into `T`; the parse error becomes the message.
///
/// Closed sets (regions, compression types, timestamp sources, ...) are
/// validated by their `FromStr` implementations.
pub struct ParsesAs<T>(PhantomData<fn() -> T>);

impl<T> ParsesAs<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ParsesAs<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ParsesAs<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParsesAs<{}>", std::any::type_name::<T>())
    }
}

impl<T> Validator for ParsesAs<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        let Some(value) = expect_str(name, value)? else {
            return Ok(());
        };
        value
            .parse::<T>()
            .map(|_| ())
            .map_err(|err| ConfigError::invalid(name, value, err.to_string()))
    }
}

/// Rejects empty output field lists and unknown field names.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFieldsValidator;

impl Validator for OutputFieldsValidator {
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        let entries = match value {
            None => return Ok(()),
            Some(ConfigValue::List(entries)) => entries,
            Some(other) => return Err(type_mismatch(name, other, "list")),
        };
        parse_output_fields(name, entries, OutputFieldEncodingType::None).map(|_| ())
    }
}

/// Rejects strings that are not well-formed templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateValidator;

impl Validator for TemplateValidator {
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        let Some(value) = expect_str(name, value)? else {
            return Ok(());
        };
        Template::parse(value)
            .map(|_| ())
            .map_err(|err| ConfigError::invalid(name, value, err.to_string()))
    }
}

/// Two validators run in sequence.
#[derive(Debug, Clone, Copy)]
pub struct Chain<A, B>(A, B);

impl<A: Validator, B: Validator> Validator for Chain<A, B> {
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        self.0.ensure_valid(name, value)?;
        self.1.ensure_valid(name, value)
    }
}

/// Warn-then-delegate wrapper for options kept only for compatibility.
pub struct Deprecated<V> {
    inner: V,
    logger: SharedLogger,
}

impl<V: Validator> Validator for Deprecated<V> {
    fn ensure_valid(&self, name: &str, value: Option<&ConfigValue>) -> Result<(), ConfigError> {
        if value.is_some() {
            self.logger.deprecated(name, DEPRECATED_OPTION_MESSAGE);
        }
        self.inner.ensure_valid(name, value)
    }
}

/// Borrow a string value, rejecting other value kinds.
fn expect_str<'a>(
    name: &str,
    value: Option<&'a ConfigValue>,
) -> Result<Option<&'a str>, ConfigError> {
    match value {
        None => Ok(None),
        Some(ConfigValue::String(value)) => Ok(Some(value)),
        Some(other) => Err(type_mismatch(name, other, "string")),
    }
}

fn type_mismatch(name: &str, value: &ConfigValue, expected: &str) -> ConfigError {
    ConfigError::invalid(name, value.rendered(), format!("expected {expected}"))
}
