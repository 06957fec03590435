mod harness;

use harness::config::ConfigBuilder;
use harness::mock_llm::{Flavor, MockLlm};
use harness::server::TestServer;

/// Parse SSE `data:` payloads from a response body
fn parse_sse_data(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data: ").or_else(|| line.strip_prefix("data:")))
        .map(ToOwned::to_owned)
        .collect()
}

fn chunk_contents(frames: &[String]) -> Vec<String> {
    frames
        .iter()
        .filter(|frame| frame.as_str() != "[DONE]")
        .map(|frame| {
            let chunk: serde_json::Value = serde_json::from_str(frame).unwrap();
            chunk["choices"][0]["delta"]["content"].as_str().unwrap().to_owned()
        })
        .collect()
}

#[tokio::test]
async fn streams_words_then_done() {
    let primary = MockLlm::start_with_response(Flavor::Anthropic, "hi there").await.unwrap();
    let config = ConfigBuilder::new().with_primary(&primary.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&serde_json::json!({
            "model": "claude-3-5-sonnet-20241022",
            "messages": [{"role": "user", "content": "hello"}],
            "stream": true
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_owned();
    assert!(content_type.starts_with("text/event-stream"), "got {content_type}");

    let frames = parse_sse_data(&resp.text().await.unwrap());
    assert_eq!(frames.last().map(String::as_str), Some("[DONE]"));
    assert_eq!(chunk_contents(&frames), vec!["hi ", "there"]);

    let first: serde_json::Value = serde_json::from_str(&frames[0]).unwrap();
    assert_eq!(first["object"], "chat.completion.chunk");
    assert_eq!(first["model"], "claude-3-5-sonnet-20241022");
    assert!(first["choices"][0]["finish_reason"].is_null());
}

#[tokio::test]
async fn stream_is_the_default() {
    let primary = MockLlm::start_with_response(Flavor::Anthropic, "one two three").await.unwrap();
    let config = ConfigBuilder::new().with_primary(&primary.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&serde_json::json!({
            "messages": [{"role": "user", "content": "hello"}]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let frames = parse_sse_data(&resp.text().await.unwrap());
    assert_eq!(chunk_contents(&frames), vec!["one ", "two ", "three"]);
}

#[tokio::test]
async fn stream_failure_emits_single_error_frame() {
    let primary = MockLlm::start_failing(Flavor::Anthropic, 10).await.unwrap();
    let config = ConfigBuilder::new().with_primary(&primary.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&serde_json::json!({
            "messages": [{"role": "user", "content": "hello"}],
            "stream": true
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let frames = parse_sse_data(&resp.text().await.unwrap());
    assert_eq!(frames.len(), 1, "frames: {frames:?}");

    let error: serde_json::Value = serde_json::from_str(&frames[0]).unwrap();
    assert_eq!(error["error"]["type"], "gateway_error");
}

#[tokio::test]
async fn empty_content_streams_one_empty_chunk() {
    let primary = MockLlm::start_with_response(Flavor::Anthropic, "").await.unwrap();
    let config = ConfigBuilder::new().with_primary(&primary.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/v1/chat/completions"))
        .json(&serde_json::json!({
            "messages": [{"role": "user", "content": "hello"}],
            "stream": true
        }))
        .send()
        .await
        .unwrap();

    let frames = parse_sse_data(&resp.text().await.unwrap());
    assert_eq!(frames.len(), 2);
    assert_eq!(chunk_contents(&frames), vec![""]);

    let chunk: serde_json::Value = serde_json::from_str(&frames[0]).unwrap();
    assert_eq!(chunk["choices"][0]["finish_reason"], "stop");
}
