//! Core data models for mod translation

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::core::errors::{ModTranslatorError, Result};

/// A `language_REGION` locale code, e.g. `en_US`
///
/// The language half is kept lowercase and the region half uppercase, which
/// is the shape mod resource files are named after.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleCode {
    language: String,
    region: String,
}

impl LocaleCode {
    /// Parse and normalize a locale code such as `es_es` or `EN_us`
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (language, region) = raw.split_once('_').ok_or_else(|| {
            ModTranslatorError::ConfigError {
                message: format!("Locale code '{}' must look like language_REGION", raw),
            }
        })?;

        let valid = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid(language) || !valid(region) {
            return Err(ModTranslatorError::ConfigError {
                message: format!("Locale code '{}' must look like language_REGION", raw),
            });
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region: region.to_ascii_uppercase(),
        })
    }

    /// Lowercase language segment
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Uppercase region segment
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Language code handed to the translation provider
    pub fn provider_code(&self) -> &str {
        &self.language
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.language, self.region)
    }
}

impl FromStr for LocaleCode {
    type Err = ModTranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Ordered key/value content of one resource file
///
/// Insertion order is kept. Inserting an existing key replaces its value
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMapping {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TextMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, returning the previous value for the key if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TextMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = TextMapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl Serialize for TextMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_code_normalization() {
        let code = LocaleCode::parse("ES_es").unwrap();
        assert_eq!(code.to_string(), "es_ES");
        assert_eq!(code.provider_code(), "es");
        assert_eq!(code.region(), "ES");

        let code: LocaleCode = " en_us ".parse().unwrap();
        assert_eq!(code.to_string(), "en_US");
    }

    #[test]
    fn test_locale_code_rejects_malformed() {
        for raw in ["english", "en_", "_US", "en_US_x", "en-US", "../_x"] {
            let err = LocaleCode::parse(raw).unwrap_err();
            assert!(
                matches!(err, ModTranslatorError::ConfigError { .. }),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_mapping_keeps_insertion_order() {
        let mut mapping = TextMapping::new();
        mapping.insert("z.last", "Z");
        mapping.insert("a.first", "A");
        mapping.insert("m.middle", "M");

        let keys: Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, vec!["z.last", "a.first", "m.middle"]);
    }

    #[test]
    fn test_mapping_reinsert_replaces_in_place() {
        let mut mapping: TextMapping = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(mapping.insert("a", "3"), Some("1".to_string()));

        let pairs: Vec<(&str, &str)> = mapping.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("missing"), None);
    }
}
