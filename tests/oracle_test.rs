//! Oracle clients against local stand-ins for the model provider and proxy

use addressmatch::config::{Config, OracleMode};
use addressmatch::core::VerifyRequest;
use addressmatch::error::AddrError;
use addressmatch::oracle::{create_oracle, GeminiOracle, Oracle, ProxiedOracle};
use addressmatch::server::{self, ProxyState};
use addressmatch::verify::Verifier;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::{Arc, Mutex};

mod common;
use common::mock_oracle::MockOracle;
use common::{spawn_server, SAMPLE_ADDRESS1, SAMPLE_ADDRESS2};

/// What the fake provider saw
#[derive(Default)]
struct Seen {
    api_key: Option<String>,
    body: Option<serde_json::Value>,
}

type SeenArc = Arc<Mutex<Seen>>;

/// Fake `generateContent` endpoint answering with `reply_text` as the model output
fn fake_gemini(seen: SeenArc, status: StatusCode, reply_text: &'static str) -> Router {
    Router::new()
        .route(
            "/v1beta/models/:model",
            post(
                move |State(seen): State<SeenArc>,
                      headers: HeaderMap,
                      Json(body): Json<serde_json::Value>| async move {
                    {
                        let mut seen = seen.lock().unwrap();
                        seen.api_key = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        seen.body = Some(body);
                    }
                    (
                        status,
                        Json(serde_json::json!({
                            "candidates": [{
                                "content": { "parts": [{ "text": reply_text }] }
                            }]
                        })),
                    )
                },
            ),
        )
        .with_state(seen)
}

fn direct_config(base: std::net::SocketAddr) -> Config {
    Config {
        oracle_mode: OracleMode::Direct,
        gemini_url: format!("http://{}", base),
        api_key: Some("test-key".to_string()),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_gemini_oracle_round_trip() {
    let seen = SeenArc::default();
    let addr = spawn_server(fake_gemini(
        seen.clone(),
        StatusCode::OK,
        r#"{"areSame": true, "reasoning": "Ave is Avenue; IL is Illinois."}"#,
    ))
    .await;

    let oracle = create_oracle(&direct_config(addr)).unwrap();
    let result = oracle
        .verify(&VerifyRequest::new(SAMPLE_ADDRESS1, SAMPLE_ADDRESS2))
        .await
        .expect("Gemini call should succeed");

    assert!(result.are_same);
    assert_eq!(result.reasoning, "Ave is Avenue; IL is Illinois.");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.api_key.as_deref(), Some("test-key"));
    let body = seen.body.as_ref().unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Levenshtein distance between normalized addresses: 6"));
    assert!(prompt.contains("85.37%"));
    assert_eq!(
        body["generationConfig"]["responseSchema"]["required"],
        serde_json::json!(["areSame", "reasoning"])
    );
}

#[tokio::test]
async fn test_gemini_malformed_output_is_an_error() {
    let addr = spawn_server(fake_gemini(
        SeenArc::default(),
        StatusCode::OK,
        r#"{"same": "probably"}"#,
    ))
    .await;

    let oracle = GeminiOracle::new(&direct_config(addr), "test-key").unwrap();
    let err = oracle
        .verify(&VerifyRequest::new("1 Main St", "2 Main St"))
        .await
        .unwrap_err();
    assert!(matches!(err, AddrError::Json(_)));
}

#[tokio::test]
async fn test_gemini_http_error_is_an_oracle_error() {
    let addr = spawn_server(fake_gemini(
        SeenArc::default(),
        StatusCode::TOO_MANY_REQUESTS,
        "",
    ))
    .await;

    let oracle = GeminiOracle::new(&direct_config(addr), "test-key").unwrap();
    let err = oracle
        .verify(&VerifyRequest::new("1 Main St", "2 Main St"))
        .await
        .unwrap_err();
    assert!(matches!(err, AddrError::Oracle(_)));
}

#[tokio::test]
async fn test_proxied_oracle_through_real_proxy() {
    let mock = Arc::new(MockOracle::new(false));
    let app = server::router(ProxyState::new(mock.clone()), &Config::default());
    let addr = spawn_server(app).await;

    let config = Config {
        proxy_url: format!("http://{}/api/verify", addr),
        ..Config::default()
    };
    let verifier = Verifier::new(Arc::new(ProxiedOracle::new(&config).unwrap()));

    let result = verifier
        .verify(SAMPLE_ADDRESS1, "789 Pine Rd, Shelbyville, IL 62565")
        .await
        .expect("Proxied call should succeed");

    assert!(!result.are_same);
    let forwarded = mock.last_request().unwrap();
    assert_eq!(forwarded.address1, SAMPLE_ADDRESS1);
    assert_eq!(
        forwarded.precomputation.normalized_address2,
        "789 pine road shelbyville il 62565"
    );
}

#[tokio::test]
async fn test_proxied_oracle_surfaces_proxy_error() {
    let app = server::router(ProxyState::unconfigured(), &Config::default());
    let addr = spawn_server(app).await;

    let config = Config {
        proxy_url: format!("http://{}/api/verify", addr),
        ..Config::default()
    };
    let oracle = ProxiedOracle::new(&config).unwrap();
    let err = oracle
        .verify(&VerifyRequest::new("1 Main St", "2 Main St"))
        .await
        .unwrap_err();

    match err {
        AddrError::Oracle(msg) => assert!(msg.contains("API_KEY is not configured")),
        other => panic!("unexpected error {:?}", other),
    }

    // Through the verifier the cause is hidden
    let verifier = Verifier::new(Arc::new(oracle));
    let err = verifier.verify("1 Main St", "2 Main St").await.unwrap_err();
    assert!(matches!(err, AddrError::VerificationFailed));
}

#[tokio::test]
async fn test_unreachable_proxy_is_a_transport_error() {
    let config = Config {
        proxy_url: "http://127.0.0.1:9/api/verify".to_string(),
        ..Config::default()
    };
    let oracle = ProxiedOracle::new(&config).unwrap();
    let err = oracle
        .verify(&VerifyRequest::new("1 Main St", "2 Main St"))
        .await
        .unwrap_err();
    assert!(matches!(err, AddrError::Http(_)));
}
