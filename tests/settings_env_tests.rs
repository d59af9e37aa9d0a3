//! Environment variables are process-wide, so this layer is tested in its
//! own binary with a single test.

use std::env;

use mod_translator::core::config::{Settings, SettingsOverrides};

const ENV_KEYS: [&str; 3] = [
    "MOD_TRANSLATOR_TARGET_LANGUAGE",
    "MOD_TRANSLATOR_REPLACE_ORIGINAL_MODS",
    "MOD_TRANSLATOR_TEMP_PATH",
];

#[test]
fn test_environment_layer_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        format!(
            r#"{{
                "original_language": "en_US",
                "target_language": "fr_FR",
                "mods_path": "{}",
                "translation_path": "{}",
                "replace_original_mods": false
            }}"#,
            dir.path().join("mods").display(),
            dir.path().join("translated").display()
        ),
    )
    .unwrap();

    let file_only = Settings::load(&path, &SettingsOverrides::default()).unwrap();
    assert_eq!(file_only.target_locale.to_string(), "fr_FR");
    assert!(!file_only.replace_original_mods);

    let work = dir.path().join("work");
    env::set_var("MOD_TRANSLATOR_TARGET_LANGUAGE", "de_de");
    env::set_var("MOD_TRANSLATOR_REPLACE_ORIGINAL_MODS", "true");
    env::set_var("MOD_TRANSLATOR_TEMP_PATH", &work);

    let from_env = Settings::load(&path, &SettingsOverrides::default());
    let overridden = Settings::load(
        &path,
        &SettingsOverrides {
            target_language: Some("it_it".to_string()),
            replace_original_mods: Some(false),
            ..Default::default()
        },
    );

    for key in ENV_KEYS {
        env::remove_var(key);
    }

    // environment beats the file
    let from_env = from_env.unwrap();
    assert_eq!(from_env.target_locale.to_string(), "de_DE");
    assert!(from_env.replace_original_mods);
    assert_eq!(from_env.temp_path, work);
    assert_eq!(from_env.source_locale.to_string(), "en_US");

    // command line beats the environment
    let overridden = overridden.unwrap();
    assert_eq!(overridden.target_locale.to_string(), "it_IT");
    assert!(!overridden.replace_original_mods);
    assert_eq!(overridden.temp_path, work);
}
