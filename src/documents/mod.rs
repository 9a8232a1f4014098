//! Uploaded-document list: view state, the HTTP seam and upload progress.
//!
//! [`DocumentStore`] owns the view state and drives a [`DocumentsApi`];
//! [`HttpDocumentsApi`] is the implementation backed by the `/pdfs` routes.

mod api;
mod model;
mod progress;
mod store;

pub use api::{DocumentsApi, HttpDocumentsApi};
pub use model::{DeleteOutcome, Document, DocumentDetail, DocumentsState, UploadFile};
pub use progress::{progress_stream, upload_percent, ProgressFn};
pub use store::DocumentStore;
