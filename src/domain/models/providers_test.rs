use super::GeneratorName;

#[test]
fn it_parses_huggingface() {
    let name = GeneratorName::parse("huggingface".to_string());
    assert_eq!(name, Some(GeneratorName::HuggingFace));
}

#[test]
fn it_parses_openai() {
    let name = GeneratorName::parse("openai".to_string());
    assert_eq!(name, Some(GeneratorName::OpenAI));
}

#[test]
fn it_rejects_unknown_provider() {
    assert!(GeneratorName::parse("libretranslate".to_string()).is_none());
}

#[test]
fn it_displays_lowercase() {
    assert_eq!(GeneratorName::HuggingFace.to_string(), "huggingface");
    assert_eq!(GeneratorName::OpenAI.to_string(), "openai");
}
