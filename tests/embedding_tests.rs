//! HTTP embedding provider tests against a wiremock server.

use sage::rag::embeddings::{EmbeddingProvider, HttpEmbeddings};
use sage::types::AppError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer, dimensions: usize) -> HttpEmbeddings {
    HttpEmbeddings::new(
        None,
        server.uri(),
        "sentence-transformers/all-MiniLM-L6-v2".to_string(),
        dimensions,
    )
}

#[tokio::test]
async fn successful_embedding_returns_vector() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({
            "model": "sentence-transformers/all-MiniLM-L6-v2",
            "input": ["Enable MFA"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [0.1, 0.2, 0.3]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let vector = provider_for(&server, 3).embed("Enable MFA").await.unwrap();

    assert_eq!(vector, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn empty_input_short_circuits_to_zero_vector() {
    // No mock mounted: a request would fail, proving none is sent.
    let server = MockServer::start().await;

    let provider = provider_for(&server, 4);
    assert_eq!(provider.embed("").await.unwrap(), vec![0.0; 4]);
    assert_eq!(provider.embed("   ").await.unwrap(), vec![0.0; 4]);
}

#[tokio::test]
async fn wrong_dimensionality_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [0.1, 0.2]}]
        })))
        .mount(&server)
        .await;

    let result = provider_for(&server, 3).embed("text").await;

    assert!(matches!(
        result,
        Err(AppError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    ));
}

#[tokio::test]
async fn empty_data_maps_to_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let result = provider_for(&server, 3).embed("text").await;

    assert!(matches!(result, Err(AppError::MalformedResponse(_))));
}

#[tokio::test]
async fn non_2xx_status_maps_to_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let result = provider_for(&server, 3).embed("text").await;

    assert!(matches!(
        result,
        Err(AppError::HttpStatus { status: 503, .. })
    ));
}
