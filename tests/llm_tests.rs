//! LLM client tests against mocked provider servers
//!
//! These tests use wiremock to stand in for the Ollama and OpenAI APIs and
//! check request shape, response parsing and error classification.

use serde_json::json;
use workorder::llm::{GenerationParams, LLMClient, LLMClientFactory, Provider};
use workorder::types::AppError;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helper Functions =============

fn ollama_provider(server: &MockServer) -> Provider {
    Provider::Ollama {
        base_url: server.uri(),
        model: "llama3.2".to_string(),
    }
}

fn openai_provider(server: &MockServer) -> Provider {
    Provider::OpenAI {
        api_key: "test-key".to_string(),
        api_base: format!("{}/v1", server.uri()),
        model: "gpt-4o-mini".to_string(),
    }
}

fn params() -> GenerationParams {
    GenerationParams {
        temperature: 0.2,
        max_tokens: 256,
    }
}

/// Create a mock Ollama chat response
fn mock_ollama_response(content: &str) -> serde_json::Value {
    json!({
        "model": "llama3.2",
        "created_at": "2024-01-01T00:00:00Z",
        "message": {
            "role": "assistant",
            "content": content
        },
        "done": true
    })
}

/// Create a mock OpenAI chat completion response
fn mock_openai_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

// ============= Ollama =============

#[tokio::test]
async fn test_ollama_generate_with_system() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llama3.2",
            "stream": false,
            "messages": [
                {"role": "system", "content": "You are the Research Agent."},
                {"role": "user", "content": "Roof?"}
            ],
            "options": {"num_predict": 256}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mock_ollama_response("Shingles are cracked.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ollama_provider(&server).create_client(params()).unwrap();
    let response = client
        .generate_with_system("You are the Research Agent.", "Roof?")
        .await
        .unwrap();

    assert_eq!(response, "Shingles are cracked.");
    assert_eq!(client.model_name(), "llama3.2");
}

#[tokio::test]
async fn test_ollama_error_status_is_generation_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model 'llama3.2' not found"))
        .mount(&server)
        .await;

    let client = ollama_provider(&server).create_client(params()).unwrap();
    let err = client.generate("Roof?").await.unwrap_err();

    assert!(matches!(err, AppError::GenerationUnavailable(_)));
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_ollama_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ollama_provider(&server).create_client(params()).unwrap();
    let err = client.generate("Roof?").await.unwrap_err();
    assert!(matches!(err, AppError::GenerationUnavailable(_)));
}

#[tokio::test]
async fn test_ollama_unreachable_server() {
    let provider = Provider::Ollama {
        base_url: "http://127.0.0.1:1".to_string(),
        model: "llama3.2".to_string(),
    };
    let client = provider.create_client(params()).unwrap();
    let err = client.generate("Roof?").await.unwrap_err();
    assert!(matches!(err, AppError::GenerationUnavailable(_)));
}

// ============= OpenAI =============

#[tokio::test]
async fn test_openai_generate_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 256,
            "messages": [{"role": "user", "content": "Draft the email"}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(mock_openai_response("Dear Contractor,")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let factory = LLMClientFactory::new(openai_provider(&server), params());
    let client = factory.create_default().unwrap();
    let response = client.generate("Draft the email").await.unwrap();

    assert_eq!(response, "Dear Contractor,");
}

#[tokio::test]
async fn test_openai_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;

    let client = openai_provider(&server).create_client(params()).unwrap();
    let err = client.generate("Draft").await.unwrap_err();

    assert!(matches!(err, AppError::GenerationUnavailable(_)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_openai_no_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = openai_provider(&server).create_client(params()).unwrap();
    let err = client.generate("Draft").await.unwrap_err();

    assert!(err.to_string().contains("No response from OpenAI"));
}
