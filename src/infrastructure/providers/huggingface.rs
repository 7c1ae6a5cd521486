#[cfg(test)]
#[path = "huggingface_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Generator;
use crate::domain::models::GeneratorName;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerationOptions {
    wait_for_model: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GenerationRequest {
    inputs: String,
    parameters: GenerationParameters,
    options: GenerationOptions,
}

pub struct HuggingFace {
    url: String,
    token: String,
    timeout: String,
}

impl Default for HuggingFace {
    fn default() -> HuggingFace {
        return HuggingFace {
            url: Config::get(ConfigKey::HuggingFaceURL),
            token: Config::get(ConfigKey::HuggingFaceToken),
            timeout: Config::get(ConfigKey::GenerateTimeout),
        };
    }
}

// The inference API answers with several shapes depending on the model and
// queue state: a list of generated_text objects, a bare object, or a plain
// string.
fn extract_generated_text(data: &serde_json::Value) -> Option<String> {
    if let Some(first) = data.as_array().and_then(|arr| return arr.first()) {
        if let Some(text) = first.get("generated_text").and_then(|e| return e.as_str()) {
            return Some(text.to_string());
        }
    }

    if let Some(text) = data.get("generated_text").and_then(|e| return e.as_str()) {
        return Some(text.to_string());
    }

    if let Some(text) = data.as_str() {
        return Some(text.to_string());
    }

    return None;
}

#[async_trait]
impl Generator for HuggingFace {
    fn name(&self) -> GeneratorName {
        return GeneratorName::HuggingFace;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Hugging Face URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Hugging Face API token is not defined");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        // The hosted inference API has no listing endpoint scoped to a
        // token, so the configured model is the only entry.
        return Ok(vec![Config::get(ConfigKey::Model)]);
    }

    #[allow(clippy::implicit_return)]
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        if self.token.is_empty() {
            bail!("Hugging Face API token is not defined");
        }

        let req = GenerationRequest {
            inputs: prompt.to_string(),
            parameters: GenerationParameters {
                max_new_tokens: max_tokens,
                temperature,
            },
            options: GenerationOptions {
                wait_for_model: true,
            },
        };

        let model = Config::get(ConfigKey::Model);
        let res = reqwest::Client::new()
            .post(format!("{url}/models/{model}", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make generation request to Hugging Face"
            );
            bail!("Failed to make generation request to Hugging Face");
        }

        let data = res.json::<serde_json::Value>().await?;
        tracing::debug!(body = ?data, "Generation response");

        let text = extract_generated_text(&data);
        if text.is_none() {
            bail!("Hugging Face returned an unrecognized response shape");
        }

        return Ok(text.unwrap().trim().to_string());
    }
}
