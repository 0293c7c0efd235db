#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};

use platescan::api::{create_router, AppState};
use platescan::config::{Config, ExtractConfig, OcrConfig, ServerConfig, StoreConfig};
use platescan::db::{InMemoryBackend, PlateStore};
use platescan::models::seed_records;
use platescan::ocr::OcrProvider;
use platescan::services::PlateService;

pub const MULTIPART_BOUNDARY: &str = "platescan-test-boundary";

/// OCR settings pointed at a mock vision endpoint.
pub fn ocr_config(base_url: String) -> OcrConfig {
    OcrConfig {
        model: "openai/gpt-4o-mini".to_string(),
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url),
        timeout_secs: 5,
        ..OcrConfig::default()
    }
}

/// OCR settings without an API key: the provider reports itself unavailable.
pub fn unavailable_ocr_config() -> OcrConfig {
    OcrConfig {
        api_key: None,
        ..OcrConfig::default()
    }
}

pub fn test_config(ocr: OcrConfig, placeholder_on_miss: bool) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            body_limit: 20 * 1024 * 1024,
        },
        store: StoreConfig::default(),
        ocr,
        extract: ExtractConfig {
            placeholder_on_miss,
        },
    }
}

/// Router over a seeded in-memory store.
pub async fn test_app(config: Config) -> Router {
    let store: Arc<dyn PlateStore> = Arc::new(InMemoryBackend::new());
    PlateService::new(store.clone())
        .seed(seed_records())
        .await
        .expect("seed store");

    let ocr = OcrProvider::new(&config.ocr);
    create_router(AppState::new(config, store, ocr))
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

/// One `file` part, without the closing boundary.
pub fn file_part(file: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"car.png\"\r\n\
         Content-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(file);
    part.extend_from_slice(b"\r\n");
    part
}

/// `multipart/form-data` request with a single `file` field.
pub fn multipart_request(uri: &str, file: &[u8]) -> Request<Body> {
    let mut body = file_part(file);
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    multipart_body_request(uri, body)
}

/// `multipart/form-data` request carrying `body` verbatim.
pub fn multipart_body_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("build request")
}

/// PNG signature padded to `len` bytes.
pub fn fake_png(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len, 0x42);
    bytes
}

pub fn fake_png_base64() -> String {
    STANDARD.encode(fake_png(256))
}

/// Minimal chat-completions reply carrying `content`.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn api_error_body(message: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": "server_error",
            "param": Value::Null,
            "code": Value::Null
        }
    })
}
