//! # Paperstore
//!
//! Reactive client-side state for a document library.
//!
//! ## Store (state container)
//!
//! - `Store<T>` - Thread-safe state container; every mutation replaces the
//!   value and notifies subscribers
//!
//! ## Documents
//!
//! - `DocumentStore` - Cached document list, upload progress, per-id delete
//!   markers and the last error, driven by a `DocumentsApi`
//! - `HttpDocumentsApi` - `reqwest` client for the `/pdfs` routes
//!
//! ## Theme
//!
//! - `ThemeStore` - Light/dark preference synchronised with a `ThemeHost`
//!   (persisted value, system colour scheme, root CSS class)

pub mod config;
pub mod documents;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod theme;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use documents::{
    DeleteOutcome, Document, DocumentDetail, DocumentStore, DocumentsApi, DocumentsState,
    HttpDocumentsApi, UploadFile,
};
pub use error::{error_message, ApiError};
pub use store::Store;
pub use theme::{MemoryHost, Theme, ThemeHost, ThemeStore};

