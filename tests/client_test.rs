//! Integration tests for the Arachnid Shield client against a mocked API.

use arachnid_shield::prelude::*;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const BASIC_AUTH: &str = "Basic dXNlcjpwYXNz"; // base64("user:pass")

fn test_client(base_url: &str) -> ArachnidShield {
    let config = ArachnidShieldConfig::new("user", "pass").with_base_url(base_url);
    ArachnidShield::with_config(config).expect("Failed to create client")
}

fn scanned_media_body(classification: serde_json::Value) -> serde_json::Value {
    json!({
        "sha1_base32": "GAYXG33E2RRNPGIDINCVIRCWKQSDGMBQ",
        "sha256_hex": "f2ca1bb6c7e907d06dafe4687e579fce76b37e4e93b7605022da52e6ccc26fd2",
        "classification": classification,
        "match_type": if classification == json!("no-known-match") || classification.is_null() {
            json!(null)
        } else {
            json!("exact")
        },
        "size_bytes": 2048,
        "near_match_details": []
    })
}

/// Matches requests that carry no Content-Length header at all.
struct NoContentLength;

impl wiremock::Match for NoContentLength {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("content-length")
    }
}

#[tokio::test]
async fn test_scan_media_from_url_derives_is_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/url/"))
        .and(header("Authorization", BASIC_AUTH))
        .and(header("Content-Type", "application/json; charset=utf-8"))
        .and(body_json(json!({"url": "https://example.com/photo.jpg"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(scanned_media_body(json!("csam"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let scanned = client
        .scan_media_from_url("https://example.com/photo.jpg")
        .await
        .expect("Scan failed");

    assert_eq!(scanned.classification, Some(MediaClassification::Csam));
    assert_eq!(scanned.match_type, Some(MatchType::Exact));
    assert_eq!(scanned.is_match, Some(true));
    assert_eq!(scanned.size_bytes, 2048);
}

#[tokio::test]
async fn test_scan_media_from_url_surfaces_server_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/url/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "invalid url"})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .scan_media_from_url("not-a-url")
        .await
        .expect_err("Expected an error result");

    assert_eq!(err.to_string(), "invalid url");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_error_without_detail_falls_back_to_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/url/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .scan_media_from_url("https://example.com/a.jpg")
        .await
        .expect_err("Expected an error result");

    assert_eq!(err.to_string(), "bad gateway");
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_scan_media_from_bytes_no_known_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/"))
        .and(header("Authorization", BASIC_AUTH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(scanned_media_body(json!("no-known-match"))),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let scanned = client
        .scan_media_from_bytes(vec![0xFF, 0xD8, 0xFF])
        .await
        .expect("Scan failed");

    assert_eq!(scanned.classification, Some(MediaClassification::NoKnownMatch));
    assert_eq!(scanned.is_match, Some(false));
    assert!(!scanned.is_match());
}

#[tokio::test]
async fn test_scan_media_from_bytes_null_classification() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scanned_media_body(json!(null))))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let scanned = client
        .scan_media_from_bytes(vec![1, 2, 3])
        .await
        .expect("Scan failed");

    assert_eq!(scanned.classification, None);
    assert_eq!(scanned.is_match, None);
}

#[tokio::test]
async fn test_explicit_mime_type_overrides_blob_type_on_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/"))
        .and(header("Content-Type", "image/jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scanned_media_body(json!("csam"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let request = ScanMediaRequest::new(MediaInput::blob(vec![1, 2, 3], "image/png"))
        .with_mime_type("image/jpeg")
        .with_size_in_bytes(3);
    client
        .scan_media_from_bytes(request)
        .await
        .expect("Scan failed");
}

#[tokio::test]
async fn test_unknown_size_omits_content_length() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/"))
        .and(NoContentLength)
        .respond_with(
            ResponseTemplate::new(200).set_body_json(scanned_media_body(json!("no-known-match"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    client
        .scan_media_from_bytes(MediaInput::blob(vec![1, 2, 3, 4], "image/png"))
        .await
        .expect("Scan failed");
}

#[tokio::test]
async fn test_known_size_sets_content_length() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/"))
        .and(header("Content-Length", "4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(scanned_media_body(json!("no-known-match"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let request = ScanMediaRequest::from(vec![9u8, 9, 9, 9]).with_size_in_bytes(4);
    client
        .scan_media_from_bytes(request)
        .await
        .expect("Scan failed");
}

#[tokio::test]
async fn test_scan_pdq_hashes_returns_mapping_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/pdq/"))
        .and(header("Authorization", BASIC_AUTH))
        .and(body_json(json!({"hashes": ["abc"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "scanned_hashes": {
                "abc": {
                    "classification": "no-known-match",
                    "match_type": null,
                    "near_match_details": null
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let scanned = client.scan_pdq_hashes(["abc"]).await.expect("Scan failed");

    assert_eq!(scanned.len(), 1);
    let matched = scanned.get("abc").expect("Missing hash entry");
    assert_eq!(matched.classification, MediaClassification::NoKnownMatch);
    assert_eq!(matched.match_type, None);
    assert!(matched.near_match_details.is_none());
}

#[tokio::test]
async fn test_scan_media_from_file_missing_path_sends_nothing() {
    let mock_server = MockServer::start().await;

    let client = test_client(&mock_server.uri());
    let err = client
        .scan_media_from_file("/definitely/not/here.jpg")
        .await
        .expect_err("Expected an error result");

    assert!(matches!(err, ScanError::Io(_)));
    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "No request should have been sent");
}

#[tokio::test]
async fn test_scan_media_from_file_resolves_type_and_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/"))
        .and(header("Content-Type", "image/png"))
        .and(header("Content-Length", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scanned_media_body(json!("csam"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("photo.png");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
        .unwrap();
    drop(file);

    let client = test_client(&mock_server.uri());
    let scanned = client
        .scan_media_from_file(&file_path)
        .await
        .expect("Scan failed");

    assert_eq!(scanned.is_match, Some(true));
}

#[tokio::test]
async fn test_scan_media_from_file_unresolvable_extension_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/media/"))
        .and(header("Content-Type", "application/octet-stream"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(scanned_media_body(json!("no-known-match"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("media.zzznope");
    std::fs::write(&file_path, b"payload").unwrap();

    let client = test_client(&mock_server.uri());
    client
        .scan_media_from_file(&file_path)
        .await
        .expect("Scan failed");
}
