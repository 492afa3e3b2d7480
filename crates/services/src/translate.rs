use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::TranslateError;

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Configuration for the remote translation helper.
#[derive(Clone, Debug)]
pub struct TranslationConfig {
    pub endpoint: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            source_lang: "it".to_string(),
            target_lang: "en".to_string(),
        }
    }
}

/// On-demand translation lookups, cached by trimmed input text.
///
/// Lookups are independent of the study engine's state: a failed or slow
/// request surfaces as a `TranslateError` to the caller and nothing else.
pub struct TranslationService {
    client: Client,
    config: TranslationConfig,
    cache: Mutex<HashMap<String, String>>,
}

impl TranslationService {
    #[must_use]
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Translates `text`, returning a cached result when available.
    ///
    /// Empty or whitespace-only input short-circuits to an empty string
    /// without touching the network.
    ///
    /// # Errors
    ///
    /// Returns `TranslateError` when the request fails, the service answers
    /// with a non-success status, or the payload holds no translation.
    pub async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let input = text.trim();
        if input.is_empty() {
            return Ok(String::new());
        }

        if let Some(hit) = self.cache_get(input) {
            debug!(%input, "translation cache hit");
            return Ok(hit);
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", self.config.source_lang.as_str()),
                ("tl", self.config.target_lang.as_str()),
                ("dt", "t"),
                ("q", input),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslateError::HttpStatus(response.status()));
        }

        let payload: Value = response.json().await?;
        let translated = extract_translation(&payload).ok_or(TranslateError::EmptyResponse)?;

        self.cache_put(input, &translated);
        Ok(translated)
    }

    fn cache_get(&self, input: &str) -> Option<String> {
        self.cache.lock().ok()?.get(input).cloned()
    }

    fn cache_put(&self, input: &str, translated: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(input.to_string(), translated.to_string());
        }
    }
}

/// Pulls the translated text out of the gtx payload: the first element is
/// an array of chunks whose first field is the translated segment.
fn extract_translation(payload: &Value) -> Option<String> {
    let chunks = payload.get(0)?.as_array()?;
    let translated: String = chunks
        .iter()
        .filter_map(|chunk| chunk.get(0)?.as_str())
        .collect();

    if translated.is_empty() {
        None
    } else {
        Some(translated)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
