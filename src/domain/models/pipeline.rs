use thiserror::Error;

/// A single request from the front end. `reply_language` is either a language
/// code or the `auto` sentinel meaning "mirror the detected input language".
pub struct PipelinePrompt {
    pub text: String,
    pub reply_language: String,
}

impl PipelinePrompt {
    pub fn new(text: String, reply_language: String) -> PipelinePrompt {
        return PipelinePrompt {
            text,
            reply_language,
        };
    }
}

/// The delivered reply for one pipeline invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineReply {
    pub text: String,
    pub language: String,
    pub detected_language: String,
    pub crisis: bool,
}

/// The only failure the pipeline raises to its caller. Every provider
/// failure downstream of input validation degrades to a fallback value
/// instead.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("message is empty")]
    EmptyInput,
}
