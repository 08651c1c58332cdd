#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

// Chat-client tests against a mocked Ollama server.
// Run with: cargo test --test integration_chat

use std::collections::BTreeSet;
use std::time::Duration;

use serde_json::json;
use tokio::task::spawn_blocking;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cart_recs::config::OllamaConfig;
use cart_recs::engine::{FALLBACK_SUGGESTIONS, RecommendationEngine};
use cart_recs::llm::{OllamaClient, parse_suggestions};

fn client_for(server: &MockServer) -> OllamaClient {
    let address = server.address();
    let config = OllamaConfig {
        protocol: "http".to_string(),
        host: address.ip().to_string(),
        port: address.port(),
        model: "test-model".to_string(),
    };

    OllamaClient::new(&config)
        .expect("Failed to create Ollama client")
        .with_timeout(Duration::from_secs(5))
        .with_retry_attempts(1)
}

#[tokio::test]
async fn chat_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "stream": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "test-model",
            "message": {
                "role": "assistant",
                "content": "Power Bank, USB Hub, Webcam"
            },
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = spawn_blocking(move || client.chat("User is interested in Laptop."))
        .await
        .expect("task completes")
        .expect("chat succeeds");

    assert_eq!(reply, "Power Bank, USB Hub, Webcam");
    assert_eq!(
        parse_suggestions(&reply),
        vec!["Power Bank", "USB Hub", "Webcam"]
    );
}

#[tokio::test]
async fn chat_sends_single_user_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "messages": [{"role": "user", "content": "Suggest things"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": "A, B"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = spawn_blocking(move || client.chat("Suggest things"))
        .await
        .expect("task completes")
        .expect("chat succeeds");

    assert_eq!(reply, "A, B");
}

#[tokio::test]
async fn server_error_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = spawn_blocking(move || client.chat("Suggest things"))
        .await
        .expect("task completes");

    assert!(result.is_err());
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_retry_attempts(3);
    let result = spawn_blocking(move || client.chat("Suggest things"))
        .await
        .expect("task completes");

    assert!(result.is_err());
}

#[tokio::test]
async fn engine_substitutes_fallback_when_chat_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let recommendation = spawn_blocking(move || {
        let engine = RecommendationEngine::new(Vec::new(), client);
        let cart: BTreeSet<String> = ["Laptop".to_string()].into_iter().collect();
        engine.recommend(&cart)
    })
    .await
    .expect("task completes");

    assert_eq!(recommendation.llm, FALLBACK_SUGGESTIONS.to_vec());
}

#[tokio::test]
async fn malformed_response_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = spawn_blocking(move || client.chat("Suggest things"))
        .await
        .expect("task completes");

    assert!(result.is_err());
}
