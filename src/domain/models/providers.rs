#[cfg(test)]
#[path = "providers_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Guesses the language of a piece of text. Implementations return a best
/// effort language code and fail fast within their configured timeout.
#[async_trait]
pub trait Detector {
    async fn detect(&self, text: &str) -> Result<String>;
}

/// Translates text between two language codes. `source == target` is an
/// identity operation and must return the input unchanged without touching
/// the network.
#[async_trait]
pub trait Translator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

#[async_trait]
pub trait Generator {
    fn name(&self) -> GeneratorName;

    /// Used at startup to verify all configurations are available to work
    /// with the provider. Failures are reported but never fatal.
    async fn health_check(&self) -> Result<()>;

    /// Called when using the `/modellist` slash command to provide all
    /// available models for the provider.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Requests a single completion for the full prompt. Providers may
    /// signal unavailability (such as a missing credential) as a plain error.
    async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String>;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GeneratorName {
    HuggingFace,
    OpenAI,
}

impl GeneratorName {
    pub fn parse(text: String) -> Option<GeneratorName> {
        return GeneratorName::iter().find(|e| {
            return e.to_string() == text;
        });
    }
}
