//! Translation gateway and the default Google Translate provider

use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::ProviderSettings;
use crate::core::errors::{ModTranslatorError, Result};
use crate::core::models::TextMapping;

/// A service that turns text in one language into another
///
/// Language arguments are provider codes such as `en` or `es`.
pub trait TranslationProvider {
    /// Translate one piece of text
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Provider backed by the public Google Translate endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    /// Create a new provider
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36");
        if let Some(timeout_ms) = settings.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| ModTranslatorError::ConfigError {
                message: format!("Cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    /// Send the actual HTTP request
    async fn send_request(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ModTranslatorError::TranslationServiceError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModTranslatorError::TranslationServiceError {
                message: format!("HTTP {}: {}", status.as_u16(), body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ModTranslatorError::TranslationServiceError {
                message: e.to_string(),
            })?;

        parse_google_response(&body)
    }
}

impl TranslationProvider for GoogleTranslator {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        self.send_request(text, source_lang, target_lang).await
    }
}

/// Extract the translation from a `translate_a/single` response
///
/// The body is a nested array; its first element lists sentence fragments
/// whose first item is the translated text.
pub fn parse_google_response(body: &str) -> Result<String> {
    let json: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ModTranslatorError::TranslationServiceError {
            message: format!("Unparseable response: {}", e),
        })?;

    let translated: String = json
        .get(0)
        .and_then(|sentences| sentences.as_array())
        .map(|sentences| {
            sentences
                .iter()
                .filter_map(|sentence| sentence.get(0).and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if translated.is_empty() {
        return Err(ModTranslatorError::TranslationServiceError {
            message: "No translation in response".to_string(),
        });
    }

    Ok(translated)
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Translates text and whole mappings between two fixed languages
#[derive(Debug, Clone)]
pub struct Translator<P> {
    provider: P,
    source_lang: String,
    target_lang: String,
}

impl<P: TranslationProvider> Translator<P> {
    /// Create a translator for one language pair
    pub fn new(provider: P, source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            provider,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Translate a single string and capitalize the result
    ///
    /// Blank input is returned unchanged without asking the provider.
    pub async fn translate(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let translated = self
            .provider
            .translate(text, &self.source_lang, &self.target_lang)
            .await?;
        Ok(capitalize_first(&translated))
    }

    /// Translate every value of a mapping, keeping keys and order
    ///
    /// Stops at the first failed translation.
    pub async fn translate_mapping(&self, mapping: &TextMapping) -> Result<TextMapping> {
        let mut translated = TextMapping::new();

        for (key, text) in mapping.iter() {
            let value = self.translate(text).await?;
            debug!("{} → {}", text, value);
            translated.insert(key, value);
        }

        info!(
            "Translated {} strings ({} → {})",
            translated.len(),
            self.source_lang,
            self.target_lang
        );
        Ok(translated)
    }
}
