//! Error types for settings lookup and loading.

use std::io;

use thiserror::Error;

/// Primary error type for settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Setting was never configured or is currently deleted.
    #[error("setting '{name}' not found")]
    SettingNotFound {
        /// Name of the setting that was read.
        name: String,
    },
    /// A setting required by an integration is absent or empty.
    #[error("{name} setting {reason}")]
    MissingSetting {
        /// Name of the required setting.
        name: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// A required setting is present but does not match its expected format.
    #[error("{name} setting: {hint}: '{value}' does not match '{pattern}'")]
    IncorrectFormat {
        /// Name of the offending setting.
        name: String,
        /// Description of the expected format (the source pattern).
        pattern: String,
        /// Caller-supplied diagnostic hint.
        hint: String,
        /// String form of the rejected value.
        value: String,
    },
    /// A format pattern failed to compile.
    #[error("invalid setting format pattern '{pattern}'")]
    InvalidPattern {
        /// Pattern supplied by the caller.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
    /// Settings document had an unexpected shape.
    #[error("invalid settings document: {reason}")]
    InvalidDocument {
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Settings document was not valid JSON.
    #[error("failed to parse settings document")]
    Parse {
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Source IO error.
        source: io::Error,
    },
}

impl ConfigError {
    /// Name of the setting this error refers to, when it refers to one.
    #[must_use]
    pub fn setting_name(&self) -> Option<&str> {
        match self {
            Self::SettingNotFound { name }
            | Self::MissingSetting { name, .. }
            | Self::IncorrectFormat { name, .. } => Some(name.as_str()),
            Self::InvalidPattern { .. }
            | Self::InvalidDocument { .. }
            | Self::Parse { .. }
            | Self::Io { .. } => None,
        }
    }
}

/// Convenience alias for settings results.
pub type ConfigResult<T> = Result<T, ConfigError>;
