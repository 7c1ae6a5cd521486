#[cfg(test)]
#[path = "libretranslate_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Detector;
use crate::domain::models::Translator;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DetectRequest {
    q: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DetectResponse {
    language: String,
    confidence: f64,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TranslateRequest {
    q: String,
    source: String,
    target: String,
    format: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Language detection and translation over a LibreTranslate instance. Both
/// operations share the short translate timeout.
pub struct LibreTranslate {
    url: String,
    timeout: String,
}

impl Default for LibreTranslate {
    fn default() -> LibreTranslate {
        return LibreTranslate {
            url: Config::get(ConfigKey::TranslateURL),
            timeout: Config::get(ConfigKey::TranslateTimeout),
        };
    }
}

#[async_trait]
impl Detector for LibreTranslate {
    #[allow(clippy::implicit_return)]
    async fn detect(&self, text: &str) -> Result<String> {
        let req = DetectRequest {
            q: text.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/detect", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make detection request to LibreTranslate"
            );
            bail!("Failed to make detection request to LibreTranslate");
        }

        let guesses = res.json::<Vec<DetectResponse>>().await?;
        tracing::debug!(body = ?guesses, "Detection response");
        if guesses.is_empty() {
            bail!("LibreTranslate returned no language guesses");
        }

        return Ok(guesses[0].language.to_string());
    }
}

#[async_trait]
impl Translator for LibreTranslate {
    #[allow(clippy::implicit_return)]
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        if source == target {
            return Ok(text.to_string());
        }

        let req = TranslateRequest {
            q: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            format: "text".to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/translate", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                source = source,
                target = target,
                "Failed to make translation request to LibreTranslate"
            );
            bail!("Failed to make translation request to LibreTranslate");
        }

        let translated = res.json::<TranslateResponse>().await?;
        tracing::debug!(body = ?translated, "Translation response");

        return Ok(translated.translated_text);
    }
}
