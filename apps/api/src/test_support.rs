//! Shared fixtures for handler and client tests: a throwaway upstream server,
//! deterministic extractors, and a multipart request builder.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::analysis::extractor::{ExtractionError, TextExtractor};
use crate::config::Config;
use crate::llm_client::SuggestionClient;
use crate::state::AppState;

pub fn test_config(base_url: &str) -> Config {
    Config {
        api_key: Some("sk-test-key".to_string()),
        base_url: base_url.to_string(),
        model: "test/model-under-test".to_string(),
        site_url: "http://localhost:5173".to_string(),
        app_title: None,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(base_url: &str, extractor: Arc<dyn TextExtractor>) -> AppState {
    let config = Arc::new(test_config(base_url));
    AppState {
        llm: SuggestionClient::new(config.clone()).unwrap(),
        config,
        extractor,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractors
// ────────────────────────────────────────────────────────────────────────────

/// Treats the upload as UTF-8 text, so tests control the "extracted" content.
pub struct Utf8Extractor;

#[async_trait]
impl TextExtractor for Utf8Extractor {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError> {
        Ok(String::from_utf8_lossy(&document).into_owned())
    }
}

pub struct FailingExtractor;

#[async_trait]
impl TextExtractor for FailingExtractor {
    async fn extract(&self, _document: Bytes) -> Result<String, ExtractionError> {
        Err(ExtractionError::Pdf("document is encrypted".to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mock upstream
// ────────────────────────────────────────────────────────────────────────────

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// A base URL with nothing listening behind it.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "gen-test",
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

pub fn fixed_upstream(status: u16, body: &'static str) -> Router {
    Router::new().route(
        "/chat/completions",
        post(move || async move {
            let status = StatusCode::from_u16(status).unwrap();
            (status, body).into_response()
        }),
    )
}

/// Replies with the user message as the completion, so callers can see
/// exactly which prompt reached the upstream.
pub fn echo_upstream() -> Router {
    Router::new().route(
        "/chat/completions",
        post(|Json(body): Json<Value>| async move {
            let user = body["messages"][1]["content"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            Json(completion(&user))
        }),
    )
}

pub fn slow_upstream(delay: Duration) -> Router {
    Router::new().route(
        "/chat/completions",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(completion("too late"))
        }),
    )
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub title: Option<String>,
    pub body: Value,
}

pub fn capturing_upstream() -> (Router, Arc<Mutex<Vec<CapturedRequest>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();
    let router = Router::new().route(
        "/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from)
                };
                sink.lock().unwrap().push(CapturedRequest {
                    authorization: header("authorization"),
                    title: header("x-title"),
                    body,
                });
                Json(completion("captured"))
            }
        }),
    );
    (router, captured)
}

// ────────────────────────────────────────────────────────────────────────────
// Requests / responses
// ────────────────────────────────────────────────────────────────────────────

const BOUNDARY: &str = "resume-review-test-boundary";

#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
        self
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ────────────────────────────────────────────────────────────────────────────
// PDF fixtures
// ────────────────────────────────────────────────────────────────────────────

/// Builds a single-page PDF with one Helvetica text line per entry.
/// An empty slice yields a valid blank page.
pub fn pdf_document(lines: &[&str]) -> Vec<u8> {
    let mut content = String::from("BT\n/F1 12 Tf\n14 TL\n72 720 Td\n");
    for line in lines {
        let escaped = line
            .replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)");
        content.push_str(&format!("({escaped}) Tj T*\n"));
    }
    content.push_str("ET\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}endstream",
            content.len()
        ),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}
