//! Required-setting resolution used before integrations build their payloads.

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::store::SettingsStore;
use crate::validate::{SettingFormat, is_blank, stringify};

/// Look up a setting that an integration cannot work without.
///
/// The value is returned as configured; only its string form is checked
/// against `format`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingSetting`] when the key is absent, deleted or
/// empty, and [`ConfigError::IncorrectFormat`] when its string form does not
/// match `format`.
pub fn get_required_setting<'s, S>(
    store: &'s S,
    name: &str,
    format: &SettingFormat,
    hint: &str,
) -> ConfigResult<&'s Value>
where
    S: SettingsStore + ?Sized,
{
    let Some(value) = store.get(name) else {
        return Err(ConfigError::MissingSetting {
            name: name.to_string(),
            reason: "was not found",
        });
    };
    if is_blank(value) {
        return Err(ConfigError::MissingSetting {
            name: name.to_string(),
            reason: "is not set",
        });
    }

    let rendered = stringify(value);
    if !format.is_match(&rendered) {
        debug!(setting = name, pattern = format.as_str(), "setting failed format check");
        return Err(ConfigError::IncorrectFormat {
            name: name.to_string(),
            pattern: format.as_str().to_string(),
            hint: hint.to_string(),
            value: rendered,
        });
    }
    Ok(value)
}

/// [`get_required_setting`] for settings that must be strings.
///
/// # Errors
///
/// Same as [`get_required_setting`]; non-string values that pass the format
/// check are rejected with [`ConfigError::IncorrectFormat`].
pub fn get_required_str<'s, S>(
    store: &'s S,
    name: &str,
    format: &SettingFormat,
    hint: &str,
) -> ConfigResult<&'s str>
where
    S: SettingsStore + ?Sized,
{
    let value = get_required_setting(store, name, format, hint)?;
    value.as_str().ok_or_else(|| ConfigError::IncorrectFormat {
        name: name.to_string(),
        pattern: format.as_str().to_string(),
        hint: hint.to_string(),
        value: stringify(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Settings;
    use serde_json::json;

    fn digits() -> SettingFormat {
        SettingFormat::new(r"\d+").expect("pattern should compile")
    }

    #[test]
    fn absent_setting_is_missing() {
        let settings = Settings::new();
        let err = get_required_setting(&settings, "USER_ID", &digits(), "invalid USER_ID")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingSetting { ref name, reason: "was not found" } if name == "USER_ID"
        ));
        assert_eq!(err.to_string(), "USER_ID setting was not found");
    }

    #[test]
    fn deleted_setting_is_missing() {
        let mut settings = Settings::new().with("USER_ID", json!("123"));
        settings.delete("USER_ID");
        let err = get_required_setting(&settings, "USER_ID", &digits(), "invalid USER_ID")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting { .. }));
    }

    #[test]
    fn empty_setting_is_missing() {
        let settings = Settings::new().with("USER_ID", json!(""));
        let err = get_required_setting(&settings, "USER_ID", &digits(), "invalid USER_ID")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingSetting {
                reason: "is not set",
                ..
            }
        ));
        assert_eq!(err.to_string(), "USER_ID setting is not set");
    }

    #[test]
    fn zero_and_false_settings_are_missing() {
        let settings = Settings::new()
            .with("USER_ID", json!(0))
            .with("ENABLED", json!(false));
        for name in ["USER_ID", "ENABLED"] {
            let err = get_required_setting(&settings, name, &digits(), "hint").unwrap_err();
            assert_eq!(err.to_string(), format!("{name} setting is not set"));
        }
    }

    #[test]
    fn malformed_setting_reports_hint() {
        let settings = Settings::new().with("USER_ID", json!("abc"));
        let err = get_required_setting(&settings, "USER_ID", &digits(), "invalid USER_ID")
            .unwrap_err();
        match err {
            ConfigError::IncorrectFormat {
                name,
                pattern,
                hint,
                value,
            } => {
                assert_eq!(name, "USER_ID");
                assert_eq!(pattern, r"\d+");
                assert_eq!(hint, "invalid USER_ID");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn valid_setting_keeps_its_type() {
        let settings = Settings::new().with("USER_ID", json!(12345));
        let value = get_required_setting(&settings, "USER_ID", &digits(), "invalid USER_ID")
            .expect("numeric id should resolve");
        assert_eq!(value, &json!(12345));
    }

    #[test]
    fn required_str_rejects_non_strings() {
        let settings = Settings::new()
            .with("NUMERIC", json!(12))
            .with("TEXT", json!("12"));
        assert_eq!(
            get_required_str(&settings, "TEXT", &digits(), "hint").expect("string id"),
            "12"
        );
        assert!(matches!(
            get_required_str(&settings, "NUMERIC", &digits(), "hint"),
            Err(ConfigError::IncorrectFormat { .. })
        ));
    }
}
