// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Label image endpoint tests for POST /v1/label-image
//!
//! These tests drive the full router with in-process providers and verify:
//! - Multipart uploads with exactly one image file are labeled
//! - The selection policy decides which label is returned
//! - Every failure returns 200 with the uniform `{ "error": string }` payload
//! - Provider detail never reaches the client

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use fabstir_image_labeler::{
    api::{create_app, AppState, HealthResponse, LabelImageResponse},
    labels::{CandidateLabel, LabelInstance, LabelingService, SelectionPolicy},
    providers::{ClassifyOptions, ImageClassifier, ProviderError, Translator},
    LanguagePair,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "----labeler-test-boundary";
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

/// Classifier returning a fixed result
struct MockClassifier {
    labels: Result<Vec<CandidateLabel>, String>,
    calls: Mutex<usize>,
}

#[async_trait]
impl ImageClassifier for MockClassifier {
    async fn classify(
        &self,
        _image: &[u8],
        _options: &ClassifyOptions,
    ) -> Result<Vec<CandidateLabel>, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        self.labels
            .clone()
            .map_err(|message| ProviderError::request("mock", message))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Translator backed by a small dictionary
struct DictionaryTranslator;

#[async_trait]
impl Translator for DictionaryTranslator {
    async fn translate(
        &self,
        text: &str,
        _languages: &LanguagePair,
    ) -> Result<String, ProviderError> {
        let translated = match text {
            "Dog" => "犬",
            "Animals" => "動物",
            "Animal" => "動物",
            "Pets" => "ペット",
            "Sky" => "空",
            _ => "",
        };

        if translated.is_empty() {
            return Err(ProviderError::empty_result("dictionary"));
        }
        Ok(translated.to_string())
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}

fn instance() -> LabelInstance {
    LabelInstance {
        bounding_box: None,
        confidence: Some(90.0),
    }
}

fn app_with(labels: Result<Vec<CandidateLabel>, String>) -> (Router, Arc<MockClassifier>) {
    app_with_limit(labels, 1024 * 1024)
}

fn app_with_limit(
    labels: Result<Vec<CandidateLabel>, String>,
    max_upload_bytes: usize,
) -> (Router, Arc<MockClassifier>) {
    let classifier = Arc::new(MockClassifier {
        labels,
        calls: Mutex::new(0),
    });
    let service = LabelingService::new(
        classifier.clone(),
        Arc::new(DictionaryTranslator),
        SelectionPolicy::default(),
        ClassifyOptions::default(),
        LanguagePair::new("en", "ja"),
    );
    let state = AppState::new(Arc::new(service), max_upload_bytes);
    (create_app(state), classifier)
}

/// A multipart part: (field name, file name, content type, bytes)
type Part<'a> = (&'a str, Option<&'a str>, Option<&'a str>, &'a [u8]);

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", name);
        if let Some(file_name) = file_name {
            disposition.push_str(&format!("; filename=\"{}\"", file_name));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/v1/label-image")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn image_request() -> Request<Body> {
    upload_request(&[("file", Some("photo.png"), Some("image/png"), PNG_BYTES)])
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[cfg(test)]
mod label_image_endpoint_tests {
    use super::*;

    #[tokio::test]
    async fn test_instance_label_is_returned_translated() {
        let (app, _) = app_with(Ok(vec![
            CandidateLabel::new("Sky", 80.0).with_category("Weather"),
            CandidateLabel::new("Dog", 85.0)
                .with_category("Animals")
                .with_instance(instance()),
        ]));

        let (status, body) = send(app, image_request()).await;

        assert_eq!(status, StatusCode::OK);
        let response: LabelImageResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.name, "犬");
        assert_eq!(response.category, "動物");
        assert_eq!(response.confidence, 85);
        assert_eq!(response.english.name, "Dog");
        assert_eq!(response.english.category, "Animals");
    }

    #[tokio::test]
    async fn test_high_confidence_label_wins() {
        let (app, _) = app_with(Ok(vec![
            CandidateLabel::new("Cat", 97.2).with_instance(instance()),
            CandidateLabel::new("Animal", 99.5).with_category("Pets"),
        ]));

        let (status, body) = send(app, image_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "name": "動物",
                "category": "ペット",
                "confidence": 99,
                "english": {"name": "Animal", "category": "Pets"}
            })
        );
    }

    #[tokio::test]
    async fn test_fallback_label_without_category() {
        let (app, _) = app_with(Ok(vec![CandidateLabel::new("Sky", 80.0)]));

        let (status, body) = send(app, image_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "空");
        assert_eq!(body["category"], "");
        assert_eq!(body["english"]["category"], "");
    }

    #[tokio::test]
    async fn test_untyped_upload_is_sniffed() {
        let (app, classifier) = app_with(Ok(vec![CandidateLabel::new("Sky", 80.0)]));
        let request = upload_request(&[(
            "file",
            Some("photo"),
            Some("application/octet-stream"),
            PNG_BYTES,
        )]);

        let (status, _) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(*classifier.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_text_fields_are_ignored() {
        let (app, _) = app_with(Ok(vec![CandidateLabel::new("Sky", 80.0)]));
        let request = upload_request(&[
            ("note", None, None, b"holiday photo".as_slice()),
            ("file", Some("photo.png"), Some("image/png"), PNG_BYTES),
        ]);

        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_classification_returns_error_payload() {
        let (app, _) = app_with(Ok(vec![]));

        let (status, body) = send(app, image_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Image labeling failed"}));
    }

    #[tokio::test]
    async fn test_classifier_failure_hides_provider_detail() {
        let (app, _) = app_with(Err("UnrecognizedClientException: key AKID123".to_string()));

        let (status, body) = send(app, image_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Image labeling failed"}));
    }

    #[tokio::test]
    async fn test_translation_failure_returns_error_payload() {
        let (app, _) = app_with(Ok(vec![
            CandidateLabel::new("Zebra", 91.0).with_category("Animals")
        ]));

        let (status, body) = send(app, image_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "Image labeling failed"}));
    }

    #[tokio::test]
    async fn test_no_label_and_provider_outage_look_the_same() {
        let (no_label_app, _) = app_with(Ok(vec![]));
        let (outage_app, _) = app_with(Err("ServiceUnavailableException".to_string()));

        let no_label = send(no_label_app, image_request()).await;
        let outage = send(outage_app, image_request()).await;

        assert_eq!(no_label, outage);
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let (app, classifier) = app_with(Ok(vec![CandidateLabel::new("Sky", 80.0)]));
        let request = upload_request(&[("note", None, None, b"no image here".as_slice())]);

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().contains("none was provided"));
        assert_eq!(*classifier.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_multiple_files_rejected() {
        let (app, classifier) = app_with(Ok(vec![CandidateLabel::new("Sky", 80.0)]));
        let request = upload_request(&[
            ("file", Some("a.png"), Some("image/png"), PNG_BYTES),
            ("file2", Some("b.png"), Some("image/png"), PNG_BYTES),
        ]);

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().contains("more than one"));
        assert_eq!(*classifier.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_image_file_rejected() {
        let (app, _) = app_with(Ok(vec![CandidateLabel::new("Sky", 80.0)]));
        let request = upload_request(&[(
            "file",
            Some("notes.txt"),
            Some("text/plain"),
            b"hello".as_slice(),
        )]);

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().contains("text/plain"));
    }

    #[tokio::test]
    async fn test_oversized_file_rejected() {
        let (app, classifier) = app_with_limit(Ok(vec![CandidateLabel::new("Sky", 80.0)]), 8);

        let (status, body) = send(app, image_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().contains("too large"));
        assert_eq!(*classifier.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_json_body_rejected_with_error_payload() {
        let (app, _) = app_with(Ok(vec![CandidateLabel::new("Sky", 80.0)]));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/v1/label-image")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"image": "dGVzdA=="}"#))
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].is_string());
    }
}

#[cfg(test)]
mod route_registration_tests {
    use super::*;

    #[tokio::test]
    async fn test_label_route_rejects_get() {
        let (app, _) = app_with(Ok(vec![]));
        let request = Request::builder()
            .method(Method::GET)
            .uri("/v1/label-image")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = app_with(Ok(vec![]));
        let request = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = serde_json::from_value(body).unwrap();
        assert_eq!(health.status, "ok");
        assert!(!health.version.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (app, _) = app_with(Ok(vec![]));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/v1/unknown")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
