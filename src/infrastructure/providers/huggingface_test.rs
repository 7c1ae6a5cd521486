use anyhow::Result;

use super::HuggingFace;
use crate::domain::models::Generator;

impl HuggingFace {
    fn with_url(url: String) -> HuggingFace {
        return HuggingFace {
            url,
            token: "abc123".to_string(),
            timeout: "200".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let provider = HuggingFace::with_url("http://localhost".to_string());
    let res = provider.health_check().await;

    assert!(res.is_ok());
}

#[tokio::test]
async fn it_fails_health_checks_without_a_token() {
    let provider = HuggingFace {
        url: "http://localhost".to_string(),
        token: "".to_string(),
        timeout: "200".to_string(),
    };
    let res = provider.health_check().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_generates_from_a_list_response() -> Result<()> {
    let body = r#"[{"generated_text": "  That sounds tough. Try three slow breaths.  "}]"#;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/")
        .with_status(200)
        .with_body(body)
        .create();

    let provider = HuggingFace::with_url(server.url());
    let res = provider.generate("User: I feel down", 200, 0.7).await?;

    assert_eq!(res, "That sounds tough. Try three slow breaths.");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_generates_from_an_object_response() -> Result<()> {
    let body = r#"{"generated_text": "Here for you."}"#;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/")
        .with_status(200)
        .with_body(body)
        .create();

    let provider = HuggingFace::with_url(server.url());
    let res = provider.generate("User: I feel down", 200, 0.7).await?;

    assert_eq!(res, "Here for you.");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_generates_from_a_plain_string_response() -> Result<()> {
    let body = r#""Take it one hour at a time.""#;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/")
        .with_status(200)
        .with_body(body)
        .create();

    let provider = HuggingFace::with_url(server.url());
    let res = provider.generate("User: I feel down", 200, 0.7).await?;

    assert_eq!(res, "Take it one hour at a time.");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_generation_on_server_errors() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/models/").with_status(503).create();

    let provider = HuggingFace::with_url(server.url());
    let res = provider.generate("User: I feel down", 200, 0.7).await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_generation_on_unrecognized_shapes() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/models/")
        .with_status(200)
        .with_body(r#"{"queue_position": 3}"#)
        .create();

    let provider = HuggingFace::with_url(server.url());
    let res = provider.generate("User: I feel down", 200, 0.7).await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_generation_without_a_token() {
    let provider = HuggingFace {
        url: "http://localhost".to_string(),
        token: "".to_string(),
        timeout: "200".to_string(),
    };
    let res = provider.generate("User: I feel down", 200, 0.7).await;

    assert!(res.is_err());
}
