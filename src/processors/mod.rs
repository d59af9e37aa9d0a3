//! Language resource codecs

pub mod json;
pub mod lang;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::errors::Result;
use crate::core::models::{LocaleCode, TextMapping};

/// The two language resource formats found in mods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    /// `en_us.json`
    Json,
    /// `en_US.lang`
    Lang,
}

impl ResourceFormat {
    /// Every format, in the order resource directories are processed
    pub const ALL: [ResourceFormat; 2] = [ResourceFormat::Json, ResourceFormat::Lang];

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ResourceFormat::Json => "json",
            ResourceFormat::Lang => "lang",
        }
    }

    /// Detect the format from a file name
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ResourceFormat::Json),
            "lang" => Some(ResourceFormat::Lang),
            _ => None,
        }
    }

    /// Name of the resource file for `locale`
    ///
    /// JSON files use the lowercased code, `.lang` files keep the region uppercase.
    pub fn file_name(self, locale: &LocaleCode) -> String {
        match self {
            ResourceFormat::Json => format!("{}.json", locale.to_string().to_lowercase()),
            ResourceFormat::Lang => format!("{}.lang", locale),
        }
    }

    /// Path of the resource file for `locale` inside `dir`
    pub fn path_in(self, dir: &Path, locale: &LocaleCode) -> PathBuf {
        dir.join(self.file_name(locale))
    }

    /// Parse file content in this format
    pub fn decode(self, content: &str) -> Result<TextMapping> {
        match self {
            ResourceFormat::Json => json::decode(content),
            ResourceFormat::Lang => lang::decode(content),
        }
    }

    /// Render `mapping` as file content in this format
    pub fn encode(self, mapping: &TextMapping) -> Result<String> {
        match self {
            ResourceFormat::Json => json::encode(mapping),
            ResourceFormat::Lang => Ok(lang::encode(mapping)),
        }
    }
}

impl fmt::Display for ResourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let locale = LocaleCode::parse("en_us").unwrap();
        assert_eq!(ResourceFormat::Json.file_name(&locale), "en_us.json");
        assert_eq!(ResourceFormat::Lang.file_name(&locale), "en_US.lang");
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            ResourceFormat::from_path(Path::new("lang/es_es.json")),
            Some(ResourceFormat::Json)
        );
        assert_eq!(
            ResourceFormat::from_path(Path::new("es_ES.lang")),
            Some(ResourceFormat::Lang)
        );
        assert_eq!(ResourceFormat::from_path(Path::new("pack.mcmeta")), None);
    }
}
