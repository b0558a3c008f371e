use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use analytical_config::{
    ConfigError, SettingFormat, Settings, SettingsStore, get_required_setting, get_required_str,
};
use serde_json::json;

fn scratch_file(contents: &str) -> anyhow::Result<PathBuf> {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let path = std::env::temp_dir().join(format!(
        "analytical-settings-{}-{nanos}.json",
        std::process::id()
    ));
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn loaded_document_feeds_required_settings() -> anyhow::Result<()> {
    let path = scratch_file(
        r#"{
            "CLICKY_SITE_ID": "12345678",
            "GOOGLE_ANALYTICS_PROPERTY_ID": "UA-1234-5",
            "ANALYTICAL_INTERNAL_IPS": ["10.0.0.1"]
        }"#,
    )?;
    let settings = Settings::from_json_file(&path);
    fs::remove_file(&path)?;
    let settings = settings?;

    let site_id = get_required_setting(
        &settings,
        "CLICKY_SITE_ID",
        &SettingFormat::new(r"\d+")?,
        "must be a (string containing) a number",
    )?;
    assert_eq!(site_id, &json!("12345678"));

    let property = get_required_str(
        &settings,
        "GOOGLE_ANALYTICS_PROPERTY_ID",
        &SettingFormat::new(r"UA-\d+-\d+")?,
        "must be a string looking like 'UA-XXXXXX-Y'",
    )?;
    assert_eq!(property, "UA-1234-5");
    Ok(())
}

#[test]
fn required_setting_error_taxonomy() -> anyhow::Result<()> {
    let format = SettingFormat::new(r"\d+")?;
    let mut settings = Settings::new();

    let missing = get_required_setting(&settings, "USER_ID", &format, "invalid USER_ID")
        .expect_err("unset key should be missing");
    assert!(matches!(missing, ConfigError::MissingSetting { .. }));
    assert_eq!(missing.setting_name(), Some("USER_ID"));

    settings.set("USER_ID", json!("abc"));
    let malformed = get_required_setting(&settings, "USER_ID", &format, "invalid USER_ID")
        .expect_err("letters should not match digits");
    assert!(matches!(malformed, ConfigError::IncorrectFormat { .. }));
    assert!(malformed.to_string().contains("invalid USER_ID"));

    settings.set("USER_ID", json!("42"));
    assert_eq!(
        get_required_setting(&settings, "USER_ID", &format, "invalid USER_ID")?,
        &json!("42")
    );

    settings.delete("USER_ID");
    assert!(matches!(
        get_required_setting(&settings, "USER_ID", &format, "invalid USER_ID"),
        Err(ConfigError::MissingSetting { .. })
    ));
    Ok(())
}

#[test]
fn settings_round_trip_through_serde() -> anyhow::Result<()> {
    let settings: Settings = serde_json::from_value(json!({
        "INTERNAL_IPS": ["127.0.0.1"],
        "ANALYTICAL_AUTO_IDENTIFY": false
    }))?;
    assert_eq!(settings.get("ANALYTICAL_AUTO_IDENTIFY"), Some(&json!(false)));
    assert_eq!(
        serde_json::to_value(&settings)?,
        json!({ "INTERNAL_IPS": ["127.0.0.1"], "ANALYTICAL_AUTO_IDENTIFY": false })
    );
    Ok(())
}
