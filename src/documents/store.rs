use super::api::DocumentsApi;
use super::model::{DeleteOutcome, DocumentDetail, DocumentsState, UploadFile};
use super::progress::{upload_percent, ProgressFn};
use crate::error::error_message;
use crate::store::{Store, SubscriptionId};
use std::sync::Arc;

/// View state for the uploaded-document list.
///
/// Every operation catches its own failure and records the formatted message
/// in [`DocumentsState::error`]; nothing is retried or rolled back beyond
/// clearing the in-flight marker of a failed delete.
#[derive(Clone)]
pub struct DocumentStore {
    state: Store<DocumentsState>,
    api: Arc<dyn DocumentsApi>,
}

impl DocumentStore {
    pub fn new(api: Arc<dyn DocumentsApi>) -> Self {
        Self {
            state: Store::new(DocumentsState::default()),
            api,
        }
    }

    /// Current view state.
    pub fn get(&self) -> DocumentsState {
        self.state.get()
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DocumentsState) -> R,
    {
        self.state.read(f)
    }

    /// Subscribe to state changes.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DocumentsState) + Send + Sync + 'static,
    {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Whether a delete for `id` is in flight.
    pub fn is_deleting(&self, id: &str) -> bool {
        self.state.read(|state| state.is_deleting(id))
    }

    /// Upload a file, tracking progress in `upload_progress`.
    ///
    /// The document list is not refreshed; call [`get_documents`](Self::get_documents)
    /// afterwards to pick up the new entry.
    pub async fn upload(&self, file: UploadFile) {
        self.state.update(|state| {
            state.error.clear();
            state.upload_progress = 0;
        });

        tracing::debug!(name = %file.name, bytes = file.len(), "uploading document");

        let view = self.state.clone();
        let on_progress: ProgressFn = Arc::new(move |loaded: u64, total: u64| {
            let progress = upload_percent(loaded, total);
            view.update(|state| state.upload_progress = progress);
        });

        let name = file.name.clone();
        match self.api.upload(file, on_progress).await {
            Ok(()) => tracing::info!(name = %name, "document uploaded"),
            Err(e) => {
                let message = error_message(&e);
                tracing::warn!(name = %name, error = %e, "upload failed");
                self.state.update(|state| state.error = message);
            }
        }
    }

    /// Replace the cached list with the server's.
    pub async fn get_documents(&self) {
        match self.api.list().await {
            Ok(data) => {
                tracing::debug!(count = data.len(), "fetched documents");
                self.state.update(|state| state.data = data);
            }
            Err(e) => {
                let message = error_message(&e);
                tracing::warn!(error = %e, "listing documents failed");
                self.state.update(|state| state.error = message);
            }
        }
    }

    /// Fetch one document and its download link. The cached list is untouched.
    pub async fn get_document(&self, id: &str) -> Option<DocumentDetail> {
        match self.api.show(id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                let message = error_message(&e);
                tracing::warn!(document_id = %id, error = %e, "fetching document failed");
                self.state.update(|state| state.error = message);
                None
            }
        }
    }

    /// Delete a document, marking it as deleting while the request is in flight.
    pub async fn delete_document(&self, id: &str) -> DeleteOutcome {
        self.state.update(|state| {
            // only ids from the cached list are marked
            if state.contains(id) {
                state.deleting_ids.insert(id.to_string());
            }
            state.error.clear();
        });

        tracing::debug!(document_id = %id, "deleting document");

        match self.api.delete(id).await {
            Ok(()) => {
                self.state.update(|state| {
                    state.data.retain(|doc| doc.id != id);
                    state.deleting_ids.remove(id);
                });
                tracing::info!(document_id = %id, "document deleted");
                DeleteOutcome::ok()
            }
            Err(e) => {
                let message = error_message(&e);
                tracing::warn!(document_id = %id, error = %e, "delete failed");
                self.state.update(|state| {
                    state.deleting_ids.remove(id);
                    state.error = message.clone();
                });
                DeleteOutcome::failed(message)
            }
        }
    }

    /// Reset the error text and upload progress.
    pub fn clear_errors(&self) {
        self.state.update(|state| {
            state.error.clear();
            state.upload_progress = 0;
        });
    }
}
