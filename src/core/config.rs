//! Configuration management

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::core::errors::{ModTranslatorError, Result};
use crate::core::models::LocaleCode;

/// Config file read when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Public Google Translate endpoint used by the default provider
pub const DEFAULT_TRANSLATOR_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Prefix of environment variables that override config file keys
pub const ENV_PREFIX: &str = "MOD_TRANSLATOR";

/// Settings as they appear in the config file, before normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSettings {
    /// Source locale code as written, e.g. `en_us`
    pub original_language: String,
    /// Target locale code as written
    pub target_language: String,
    /// Mods folder, may contain `%APPDATA%`
    pub mods_path: String,
    /// Output folder, may contain `%APPDATA%`
    pub translation_path: String,
    /// Replace the original mods after translating
    pub replace_original_mods: bool,
    /// Working folder
    pub temp_path: String,
    /// Archive extension, with or without the dot
    pub archive_extension: String,
    /// Require a source resource file in language folders
    pub require_source_file: bool,
    /// Translation service endpoint
    pub translator_endpoint: String,
    /// Request timeout in milliseconds
    #[serde(default)]
    pub translator_timeout_ms: Option<u64>,
}

/// Values given on the command line; they win over every other source
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Source locale code
    pub original_language: Option<String>,
    /// Target locale code
    pub target_language: Option<String>,
    /// Mods folder
    pub mods_path: Option<PathBuf>,
    /// Output folder
    pub translation_path: Option<PathBuf>,
    /// Working folder
    pub temp_path: Option<PathBuf>,
    /// Replace the original mods after translating
    pub replace_original_mods: Option<bool>,
}

/// Translation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Endpoint of the translation service
    pub endpoint: String,
    /// Request timeout; `None` waits forever
    pub timeout_ms: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSLATOR_ENDPOINT.to_string(),
            timeout_ms: None,
        }
    }
}

/// Run settings, fixed for the whole run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Locale the mods ship with
    pub source_locale: LocaleCode,
    /// Locale to translate into
    pub target_locale: LocaleCode,
    /// Directory holding the mod archives
    pub mods_path: PathBuf,
    /// Directory receiving the repacked archives
    pub translation_path: PathBuf,
    /// Working directory for unpacked archives
    pub temp_path: PathBuf,
    /// Replace the original archives with the translated ones
    pub replace_original_mods: bool,
    /// Extension of archive files picked up from `mods_path`
    pub archive_extension: String,
    /// Only treat directories holding a source resource file as resource directories
    pub require_source_file: bool,
    /// Translation provider settings
    pub translator: ProviderSettings,
}

impl Settings {
    /// Load settings from defaults, the config file, `MOD_TRANSLATOR_*`
    /// environment variables and command line overrides, in that order
    pub fn load<P: AsRef<Path>>(config_path: P, overrides: &SettingsOverrides) -> Result<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            warn!(
                "Config file {} not found, relying on environment and CLI values",
                config_path.display()
            );
        }

        let mut builder = config::Config::builder()
            .set_default("temp_path", "temp")?
            .set_default("archive_extension", "jar")?
            .set_default("require_source_file", true)?
            .set_default("translator_endpoint", DEFAULT_TRANSLATOR_ENDPOINT)?
            .add_source(config::File::from(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX));

        if let Some(lang) = &overrides.original_language {
            builder = builder.set_override("original_language", lang.as_str())?;
        }
        if let Some(lang) = &overrides.target_language {
            builder = builder.set_override("target_language", lang.as_str())?;
        }
        if let Some(path) = &overrides.mods_path {
            builder = builder.set_override("mods_path", path.to_string_lossy().into_owned())?;
        }
        if let Some(path) = &overrides.translation_path {
            builder = builder.set_override("translation_path", path.to_string_lossy().into_owned())?;
        }
        if let Some(path) = &overrides.temp_path {
            builder = builder.set_override("temp_path", path.to_string_lossy().into_owned())?;
        }
        if let Some(replace) = overrides.replace_original_mods {
            builder = builder.set_override("replace_original_mods", replace)?;
        }

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        let settings = Self::from_raw(raw, std::env::var("APPDATA").ok().as_deref())?;
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// Normalize raw settings, substituting `%APPDATA%` in paths when `appdata` is known
    pub fn from_raw(raw: RawSettings, appdata: Option<&str>) -> Result<Self> {
        let settings = Self {
            source_locale: LocaleCode::parse(&raw.original_language)?,
            target_locale: LocaleCode::parse(&raw.target_language)?,
            mods_path: PathBuf::from(expand_appdata(&raw.mods_path, appdata)),
            translation_path: PathBuf::from(expand_appdata(&raw.translation_path, appdata)),
            temp_path: PathBuf::from(raw.temp_path),
            replace_original_mods: raw.replace_original_mods,
            archive_extension: raw.archive_extension.trim_start_matches('.').to_string(),
            require_source_file: raw.require_source_file,
            translator: ProviderSettings {
                endpoint: raw.translator_endpoint,
                timeout_ms: raw.translator_timeout_ms,
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.archive_extension.is_empty() {
            return Err(ModTranslatorError::ConfigError {
                message: "archive_extension must not be empty".to_string(),
            });
        }

        if self.source_locale == self.target_locale {
            return Err(ModTranslatorError::ConfigError {
                message: format!(
                    "Source and target language are both {}",
                    self.source_locale
                ),
            });
        }

        for (key, path) in [
            ("mods_path", &self.mods_path),
            ("translation_path", &self.translation_path),
            ("temp_path", &self.temp_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ModTranslatorError::ConfigError {
                    message: format!("{} must not be empty", key),
                });
            }
        }

        let folders = [
            ("mods_path", normalize_path(&self.mods_path)?),
            ("translation_path", normalize_path(&self.translation_path)?),
            ("temp_path", normalize_path(&self.temp_path)?),
        ];
        for (i, (key, path)) in folders.iter().enumerate() {
            for (other_key, other) in &folders[i + 1..] {
                if path.starts_with(other) || other.starts_with(path) {
                    return Err(ModTranslatorError::ConfigError {
                        message: format!(
                            "{} and {} must be separate folders, neither inside the other",
                            key, other_key
                        ),
                    });
                }
            }
        }

        if self.translator.endpoint.is_empty() {
            return Err(ModTranslatorError::ConfigError {
                message: "translator_endpoint must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Starter config file contents written by `init-config`
    pub fn starter_config() -> serde_json::Value {
        serde_json::json!({
            "original_language": "en_US",
            "target_language": "es_ES",
            "mods_path": "%APPDATA%/.minecraft/mods",
            "translation_path": "translated_mods",
            "replace_original_mods": false
        })
    }

    /// Save a starter config file
    pub fn write_starter_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&Self::starter_config())?;
        std::fs::write(path, content).map_err(|e| ModTranslatorError::file(path, e))?;
        Ok(())
    }
}

fn appdata_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)%appdata%").expect("valid %APPDATA% pattern"))
}

/// Replace every case-insensitive `%APPDATA%` with `appdata`
pub fn expand_appdata(path: &str, appdata: Option<&str>) -> String {
    match appdata {
        Some(appdata) => appdata_pattern()
            .replace_all(path, NoExpand(appdata))
            .into_owned(),
        None => path.to_string(),
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically
///
/// The folders may not exist yet, so nothing is looked up on disk.
fn normalize_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
