//! Integration tests for Paperstore

use paperstore::{
    error_message, ApiError, ClientConfig, DocumentStore, DocumentsApi, HttpDocumentsApi,
    MemoryHost, Theme, ThemeStore, UploadFile,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing() -> serde_json::Value {
    json!([
        {"id": "p1", "file_id": "f1", "name": "alpha.pdf", "user_id": 1},
        {"id": "p2", "file_id": "f2", "name": "beta.pdf", "user_id": 1},
        {"id": "p3", "file_id": "f3", "name": "gamma.pdf", "user_id": 1}
    ])
}

async fn mock_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/pdfs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .mount(server)
        .await;
}

fn store_for(server: &MockServer, chunk_size: usize) -> DocumentStore {
    let api = HttpDocumentsApi::new(reqwest::Client::new(), format!("{}/api/", server.uri()))
        .with_upload_chunk_size(chunk_size);
    DocumentStore::new(Arc::new(api))
}

#[tokio::test]
async fn list_keeps_server_order() {
    let server = MockServer::start().await;
    mock_listing(&server).await;
    let store = store_for(&server, 1024);

    store.get_documents().await;

    let names: Vec<String> = store.get().data.into_iter().map(|d| d.name).collect();
    assert_eq!(names, ["alpha.pdf", "beta.pdf", "gamma.pdf"]);
}

#[tokio::test]
async fn upload_sends_file_field_and_reports_progress() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pdfs"))
        .and(body_string_contains(r#"name="file""#))
        .and(body_string_contains(r#"filename="notes.pdf""#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "p9", "file_id": "f9", "name": "notes.pdf"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server, 4);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    store.subscribe(move |state| seen_clone.lock().unwrap().push(state.upload_progress));

    store
        .upload(UploadFile::pdf("notes.pdf", b"0123456789".to_vec()))
        .await;

    let state = store.get();
    assert_eq!(state.error, "");
    assert_eq!(state.upload_progress, 100);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.first(), Some(&0));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
    assert!(seen.contains(&40) && seen.contains(&80));
}

#[tokio::test]
async fn upload_rejection_surfaces_server_message() {
    let server = MockServer::start().await;
    mock_listing(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/pdfs"))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({"message": "File too large"})))
        .mount(&server)
        .await;

    let store = store_for(&server, 1024);
    store.get_documents().await;
    let before = store.get().data;

    store.upload(UploadFile::pdf("huge.pdf", vec![0u8; 16])).await;

    let state = store.get();
    assert_eq!(state.error, "File too large");
    assert_eq!(state.data, before);
}

#[tokio::test]
async fn unreachable_server_sets_transport_error() {
    let api = HttpDocumentsApi::new(reqwest::Client::new(), "http://127.0.0.1:1/api");
    let store = DocumentStore::new(Arc::new(api));

    store.upload(UploadFile::pdf("a.pdf", vec![1u8; 4])).await;

    let state = store.get();
    assert!(state.error.starts_with("Request failed"), "{}", state.error);
    assert!(state.data.is_empty());
    // refused before any body chunk was read
    assert_eq!(state.upload_progress, 0);
}

#[tokio::test]
async fn delete_removes_document_on_success() {
    let server = MockServer::start().await;
    mock_listing(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/pdfs/p2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "PDF deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server, 1024);
    store.get_documents().await;

    let outcome = store.delete_document("p2").await;

    assert!(outcome.success);
    assert_eq!(outcome.error, None);
    let state = store.get();
    let ids: Vec<&str> = state.data.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["p1", "p3"]);
    assert!(state.deleting_ids.is_empty());
}

#[tokio::test]
async fn delete_failure_keeps_list_and_reports() {
    let server = MockServer::start().await;
    mock_listing(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/pdfs/p1"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "Failed to delete PDF: storage offline"})),
        )
        .mount(&server)
        .await;

    let store = store_for(&server, 1024);
    store.get_documents().await;

    let outcome = store.delete_document("p1").await;

    assert!(!outcome.success);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Failed to delete PDF: storage offline")
    );
    let state = store.get();
    assert_eq!(state.data.len(), 3);
    assert!(!state.is_deleting("p1"));
    assert_eq!(state.error, "Failed to delete PDF: storage offline");
}

#[tokio::test]
async fn show_returns_download_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pdfs/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pdf": {"id": "p1", "file_id": "f1", "name": "alpha.pdf"},
            "download_url": "https://files.example.com/f1?sig=abc"
        })))
        .mount(&server)
        .await;

    let store = store_for(&server, 1024);
    let detail = store.get_document("p1").await.expect("detail");

    assert_eq!(detail.pdf.name, "alpha.pdf");
    assert_eq!(detail.download_url, "https://files.example.com/f1?sig=abc");
}

#[tokio::test]
async fn malformed_listing_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pdfs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = HttpDocumentsApi::new(reqwest::Client::new(), server.uri());
    let err = api.list().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert!(error_message(&err).starts_with("Invalid response body"));
}

#[tokio::test]
async fn client_from_config_uses_base_url() {
    let server = MockServer::start().await;
    mock_listing(&server).await;

    let config = ClientConfig {
        api_base_url: format!("{}/api", server.uri()),
        ..ClientConfig::default()
    };
    let api = HttpDocumentsApi::from_config(&config).unwrap();

    assert_eq!(api.list().await.unwrap().len(), 3);
}

#[test]
fn theme_store_integration() {
    let host = Arc::new(MemoryHost::new(true));
    let theme = ThemeStore::new(host.clone());

    theme.init();
    assert_eq!(theme.get(), Theme::Dark);
    assert!(host.has_root_class("dark"));

    theme.toggle();
    assert_eq!(theme.get(), Theme::Light);
    assert!(!host.has_root_class("dark"));

    // a fresh store on the same host picks up the persisted choice
    let reloaded = ThemeStore::new(host.clone());
    reloaded.init();
    assert_eq!(reloaded.get(), Theme::Light);
}
