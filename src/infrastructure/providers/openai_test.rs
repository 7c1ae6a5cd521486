use anyhow::Result;

use super::CompletionChoiceResponse;
use super::CompletionMessageResponse;
use super::CompletionResponse;
use super::Model;
use super::ModelListResponse;
use super::OpenAI;
use crate::domain::models::Generator;

impl OpenAI {
    fn with_url(url: String) -> OpenAI {
        return OpenAI {
            url,
            token: "abc123".to_string(),
            timeout: "200".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(200).create();

    let provider = OpenAI::with_url(server.url());
    let res = provider.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/").with_status(500).create();

    let provider = OpenAI::with_url(server.url());
    let res = provider.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_a_token() {
    let provider = OpenAI {
        url: "http://localhost".to_string(),
        token: "".to_string(),
        timeout: "200".to_string(),
    };
    let res = provider.health_check().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_lists_models() -> Result<()> {
    let body = serde_json::to_string(&ModelListResponse {
        data: vec![
            Model {
                id: "second".to_string(),
            },
            Model {
                id: "first".to_string(),
            },
        ],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1/models")
        .with_status(200)
        .with_body(body)
        .create();

    let provider = OpenAI::with_url(server.url());
    let res = provider.list_models().await?;

    assert_eq!(res, vec!["first".to_string(), "second".to_string()]);
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_generates_a_completion() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse {
        choices: vec![CompletionChoiceResponse {
            message: CompletionMessageResponse {
                content: "That sounds tough. Try three slow breaths.".to_string(),
            },
        }],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(body)
        .create();

    let provider = OpenAI::with_url(server.url());
    let res = provider.generate("User: I feel down", 200, 0.7).await?;

    assert_eq!(res, "That sounds tough. Try three slow breaths.");
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_generation_on_server_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .create();

    let provider = OpenAI::with_url(server.url());
    let res = provider.generate("User: I feel down", 200, 0.7).await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_generation_on_empty_choices() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse { choices: vec![] })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(body)
        .create();

    let provider = OpenAI::with_url(server.url());
    let res = provider.generate("User: I feel down", 200, 0.7).await;

    assert!(res.is_err());
    mock.assert();

    return Ok(());
}
