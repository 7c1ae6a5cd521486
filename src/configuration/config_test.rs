use anyhow::Result;

use super::Config;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let doc_res = res.parse::<toml_edit::Document>();
    assert!(doc_res.is_ok());

    let doc = doc_res.unwrap();
    assert_eq!(
        doc.get("generator").unwrap().as_str().unwrap(),
        "huggingface"
    );
    assert_eq!(doc.get("pivot-language").unwrap().as_str().unwrap(), "en");
    assert_eq!(
        doc.get("generate-max-tokens")
            .unwrap()
            .as_integer()
            .unwrap(),
        200
    );

    // Secrets are written as commented placeholders, never with values.
    assert!(res.contains("# hugging-face-token = \"\""));
    assert!(res.contains("# open-ai-token = \"\""));
    assert!(doc.get("hugging-face-token").is_none());
    assert!(doc.get("config-file").is_none());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec!["solace", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["solace", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
