pub mod huggingface;
pub mod libretranslate;
pub mod openai;
use anyhow::Result;

use crate::domain::models::Detector;
use crate::domain::models::Generator;
use crate::domain::models::GeneratorName;
use crate::domain::models::Translator;

pub type DetectorBox = Box<dyn Detector + Send + Sync>;
pub type TranslatorBox = Box<dyn Translator + Send + Sync>;
pub type GeneratorBox = Box<dyn Generator + Send + Sync>;

pub struct ProviderManager {}

impl ProviderManager {
    pub fn get_detector() -> Result<DetectorBox> {
        return Ok(Box::<libretranslate::LibreTranslate>::default());
    }

    pub fn get_translator() -> Result<TranslatorBox> {
        return Ok(Box::<libretranslate::LibreTranslate>::default());
    }

    pub fn get_generator(name: GeneratorName) -> Result<GeneratorBox> {
        if name == GeneratorName::HuggingFace {
            return Ok(Box::<huggingface::HuggingFace>::default());
        }

        return Ok(Box::<openai::OpenAI>::default());
    }
}
