//! Document store against a running backend
//!
//! Set `PAPERSTORE__API_BASE_URL` (or a `paperstore.toml`) to point at the API.
//! Pass a path to upload that file first.

use paperstore::{ClientConfig, DocumentStore, HttpDocumentsApi, UploadFile};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::load()?;
    paperstore::telemetry::init_tracing(&config.log_level, config.log_json);

    println!("=== Documents Example ===\n");
    println!("API: {}", config.base_url());

    let store = DocumentStore::new(Arc::new(HttpDocumentsApi::from_config(&config)?));

    store.subscribe(|state| {
        if state.has_error() {
            println!("error: {}", state.error);
        } else if state.upload_progress > 0 && state.upload_progress < 100 {
            println!("uploading... {}%", state.upload_progress);
        }
    });

    if let Some(path) = std::env::args().nth(1) {
        let bytes = std::fs::read(&path)?;
        let name = std::path::Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        println!("Uploading {}...", name);
        store.upload(UploadFile::pdf(name, bytes)).await;
    }

    store.get_documents().await;

    println!("\nDocuments:");
    store.read(|state| {
        for doc in &state.data {
            println!("  {}  {}", doc.id, doc.name);
        }
    });

    Ok(())
}
