//! HTTP behaviour of the homework statuses client against a mock server.

use homework_bot_core::{BotError, Config, PracticumClient};
use mockito::Matcher;
use serde_json::json;

const PATH: &str = "/api/user_api/homework_statuses/";

fn test_config(endpoint: String) -> Config {
    let mut config = Config::from_lookup(|key| match key {
        "PRACTICUM_TOKEN" => Some("test-token".to_string()),
        "TELEGRAM_TOKEN" => Some("bot-token".to_string()),
        "TELEGRAM_CHAT_ID" => Some("42".to_string()),
        _ => None,
    })
    .unwrap();
    config.endpoint = endpoint;
    config
}

#[tokio::test]
async fn test_sends_auth_header_and_from_date() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", PATH)
        .match_header("authorization", "OAuth test-token")
        .match_query(Matcher::UrlEncoded(
            "from_date".into(),
            "1700000000".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"homeworks": [], "current_date": 1700000600}"#)
        .create_async()
        .await;

    let client = PracticumClient::new(&test_config(format!("{}{PATH}", server.url())));
    let body = client.get_api_answer(1_700_000_000).await.unwrap();

    assert_eq!(body, json!({"homeworks": [], "current_date": 1700000600}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_200_is_unexpected_status_code() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = PracticumClient::new(&test_config(format!("{}{PATH}", server.url())));
    let err = client.get_api_answer(0).await.unwrap_err();

    assert!(matches!(err, BotError::UnexpectedStatusCode { code: 503 }));
    assert!(err.to_string().contains("UnexpectedStatusCode"));
}

#[tokio::test]
async fn test_other_success_codes_are_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", PATH)
        .match_query(Matcher::Any)
        .with_status(204)
        .create_async()
        .await;

    let client = PracticumClient::new(&test_config(format!("{}{PATH}", server.url())));
    let err = client.get_api_answer(0).await.unwrap_err();

    assert!(matches!(err, BotError::UnexpectedStatusCode { code: 204 }));
}

#[tokio::test]
async fn test_invalid_json_is_malformed_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = PracticumClient::new(&test_config(format!("{}{PATH}", server.url())));
    let err = client.get_api_answer(0).await.unwrap_err();

    assert!(matches!(err, BotError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Nothing listens on port 1.
    let client = PracticumClient::new(&test_config("http://127.0.0.1:1/".to_string()));
    let err = client.get_api_answer(123).await.unwrap_err();

    match err {
        BotError::EndpointUnavailable { diagnostics, .. } => {
            assert_eq!(diagnostics.endpoint, "http://127.0.0.1:1/");
            assert_eq!(
                diagnostics.params,
                vec![("from_date".to_string(), "123".to_string())]
            );
            assert!(!diagnostics.to_string().contains("test-token"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_message_same_for_every_cursor() {
    let client = PracticumClient::new(&test_config("http://127.0.0.1:1/".to_string()));
    let first = client.get_api_answer(1_700_000_000).await.unwrap_err();
    let second = client.get_api_answer(1_700_000_600).await.unwrap_err();

    assert!(!first.to_string().contains("from_date"), "{first}");
    assert_eq!(first.to_string(), second.to_string());
}

#[tokio::test]
async fn test_invalid_endpoint_is_request_failed() {
    let client = PracticumClient::new(&test_config("not a url".to_string()));
    let err = client.get_api_answer(0).await.unwrap_err();

    assert!(matches!(err, BotError::RequestFailed { .. }));
    assert!(err.to_string().starts_with("RequestFailed"));
}
