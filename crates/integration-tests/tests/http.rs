mod harness;

use std::net::SocketAddr;

use harness::config::ConfigBuilder;
use harness::mock_llm::{Flavor, MockLlm};
use harness::server::TestServer;

#[tokio::test]
async fn health_reports_listen_port() {
    let config = ConfigBuilder::new()
        .with_listen_address(SocketAddr::from(([127, 0, 0, 1], 8123)))
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"status": "ok", "port": 8123}));
}

#[tokio::test]
async fn health_disabled_returns_404() {
    let server = TestServer::start(ConfigBuilder::new().without_health().build()).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn echo_endpoint_never_calls_providers() {
    let primary = MockLlm::start(Flavor::Anthropic).await.unwrap();
    let config = ConfigBuilder::new().with_primary(&primary.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/chat/completions/test"))
        .json(&serde_json::json!({
            "messages": [
                {"role": "user", "content": "first"},
                {"role": "user", "content": "ping"}
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["id"], "test-123");
    assert_eq!(body["model"], "test");
    assert_eq!(body["choices"][0]["message"]["content"], "Echo: ping");
    assert_eq!(primary.completion_count(), 0);
}

#[tokio::test]
async fn models_lists_available_providers_in_order() {
    let primary = MockLlm::start(Flavor::Anthropic).await.unwrap();
    let secondary = MockLlm::start(Flavor::OpenAi).await.unwrap();
    let config = ConfigBuilder::new()
        .with_primary(&primary.base_url())
        .with_secondary(&secondary.base_url())
        .with_secondary_model("gpt-4o-mini")
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/v1/models")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["primary_provider"], "anthropic");
    assert_eq!(body["fallback_provider"], "openai");
    assert_eq!(body["available_models"][0]["id"], "claude-3-5-sonnet-20241022");
    assert_eq!(body["available_models"][1]["id"], "gpt-4o-mini");
    assert_eq!(body["available_models"][1]["status"], "available");
}

#[tokio::test]
async fn malformed_body_returns_400() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .header("content-type", "application/json")
        .body(r#"{"messages": "not a list"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"]["message"].is_string());
}
