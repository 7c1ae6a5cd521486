#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;

use anyhow::Result;

use super::crisis::CrisisScanner;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::PipelineError;
use crate::domain::models::PipelineReply;
use crate::infrastructure::providers::DetectorBox;
use crate::infrastructure::providers::GeneratorBox;
use crate::infrastructure::providers::TranslatorBox;

/// Sentinel reply language meaning "mirror the detected input language".
pub const AUTO_LANGUAGE: &str = "auto";

// The configured emergency contact line is appended to this when the crisis
// scanner fires.
const SAFETY_TEMPLATE: &str =
    "I'm really sorry you're carrying this much pain right now. You are not alone.";

fn instruction_preamble() -> String {
    let parts = [
        "You are Solace, a calm and supportive companion.",
        "Keep replies short (2-5 sentences), validate the person's feelings, and offer one simple coping step such as breathing, grounding, or a brief activity.",
        "Gently suggest reaching out to someone they trust, or to a professional, when it would help.",
        "Do not diagnose or give medical advice. Use plain, friendly language.",
    ];

    return parts.join(" ");
}

pub struct PipelineSettings {
    pub pivot_language: String,
    pub emergency_contact: String,
    pub fallback_reply: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl PipelineSettings {
    pub fn from_config() -> Result<PipelineSettings> {
        return Ok(PipelineSettings {
            pivot_language: Config::get(ConfigKey::PivotLanguage),
            emergency_contact: Config::get(ConfigKey::EmergencyContact),
            fallback_reply: Config::get(ConfigKey::FallbackReply),
            max_tokens: Config::get(ConfigKey::GenerateMaxTokens).parse::<u32>()?,
            temperature: Config::get(ConfigKey::GenerateTemperature).parse::<f32>()?,
        });
    }
}

/// The round-trip message pipeline: detect the input language, normalize to
/// the pivot language, scan for crisis indicators, reply from either the
/// safety template or the generation provider, and translate back to the
/// user's language.
///
/// The pipeline holds no mutable state; appending to the conversation history
/// is the caller's job. Collaborators are called once each, in order, with no
/// retries.
pub struct MessagePipeline {
    detector: DetectorBox,
    translator: TranslatorBox,
    generator: GeneratorBox,
    crisis: CrisisScanner,
    settings: PipelineSettings,
}

impl MessagePipeline {
    pub fn new(
        detector: DetectorBox,
        translator: TranslatorBox,
        generator: GeneratorBox,
        crisis: CrisisScanner,
        settings: PipelineSettings,
    ) -> MessagePipeline {
        return MessagePipeline {
            detector,
            translator,
            generator,
            crisis,
            settings,
        };
    }

    /// Runs one message through the pipeline. Aside from `EmptyInput`, every
    /// provider failure degrades to a deterministic fallback so the user
    /// always receives some reply.
    pub async fn handle(
        &self,
        raw_text: &str,
        requested_language: Option<&str>,
    ) -> Result<PipelineReply, PipelineError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let pivot = self.settings.pivot_language.to_string();

        let detected = match self.detector.detect(text).await {
            Ok(code) if !code.is_empty() => code,
            Ok(_) => pivot.to_string(),
            Err(err) => {
                tracing::warn!(error = ?err, "Detection is unavailable, assuming the pivot language");
                pivot.to_string()
            }
        };

        let pivot_text = if detected != pivot {
            match self.translator.translate(text, &detected, &pivot).await {
                Ok(translated) if !translated.trim().is_empty() => translated,
                Ok(_) => text.to_string(),
                Err(err) => {
                    tracing::warn!(error = ?err, source = detected.as_str(), "Translation to the pivot language failed, keeping the original text");
                    text.to_string()
                }
            }
        } else {
            text.to_string()
        };

        let crisis = self.crisis.matches(&pivot_text);
        let reply_pivot = if crisis {
            // Hard rule: generated text never reaches someone in crisis.
            format!("{SAFETY_TEMPLATE} {}", self.settings.emergency_contact)
        } else {
            let prompt = format!(
                "{}\n\nUser: {pivot_text}\n\nAssistant:",
                instruction_preamble()
            );
            match self
                .generator
                .generate(&prompt, self.settings.max_tokens, self.settings.temperature)
                .await
            {
                Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
                Ok(_) => self.settings.fallback_reply.to_string(),
                Err(err) => {
                    tracing::warn!(error = ?err, "Generation is unavailable, substituting the fallback reply");
                    self.settings.fallback_reply.to_string()
                }
            }
        };

        let target = match requested_language {
            Some(code) if !code.is_empty() && code != AUTO_LANGUAGE => code.to_string(),
            _ => detected.to_string(),
        };

        let (reply_text, reply_language) = if target != pivot {
            match self.translator.translate(&reply_pivot, &pivot, &target).await {
                Ok(translated) if !translated.trim().is_empty() => (translated, target),
                Ok(_) => (reply_pivot, pivot),
                Err(err) => {
                    tracing::warn!(error = ?err, target = target.as_str(), "Translation from the pivot language failed, delivering the pivot text");
                    (reply_pivot, pivot)
                }
            }
        } else {
            (reply_pivot, pivot)
        };

        return Ok(PipelineReply {
            text: reply_text,
            language: reply_language,
            detected_language: detected,
            crisis,
        });
    }
}
