//! Format validation helpers for setting values.

use std::fmt::{self, Display, Formatter};
use std::num::FpCategory;

use regex::Regex;
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

/// Regular expression a setting's string form must match in full.
#[derive(Debug, Clone)]
pub struct SettingFormat {
    source: String,
    anchored: Regex,
}

impl SettingFormat {
    /// Compile a format from a pattern; the pattern is anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] when the pattern does not compile.
    pub fn new(pattern: &str) -> ConfigResult<Self> {
        let anchored =
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_string(),
            anchored,
        })
    }

    /// Pattern as supplied by the caller, used in diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `candidate` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        self.anchored.is_match(candidate)
    }
}

impl TryFrom<&Regex> for SettingFormat {
    type Error = ConfigError;

    fn try_from(regex: &Regex) -> ConfigResult<Self> {
        Self::new(regex.as_str())
    }
}

impl Display for SettingFormat {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.source)
    }
}

/// String form used when matching a value against a [`SettingFormat`].
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}

/// Whether a present value still counts as "not set": `null`, `false`, zero,
/// and empty strings, arrays or objects.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(enabled) => !enabled,
        Value::Number(number) => number
            .as_f64()
            .is_some_and(|n| n.classify() == FpCategory::Zero),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
