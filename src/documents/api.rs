use super::model::{Document, DocumentDetail, UploadFile};
use super::progress::{progress_stream, ProgressFn};
use crate::config::ClientConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use serde::de::DeserializeOwned;

/// The document routes the stores talk to.
#[async_trait]
pub trait DocumentsApi: Send + Sync {
    /// `GET /pdfs`
    async fn list(&self) -> Result<Vec<Document>, ApiError>;

    /// `GET /pdfs/{id}`
    async fn show(&self, id: &str) -> Result<DocumentDetail, ApiError>;

    /// `POST /pdfs` as multipart with the file in the `file` field.
    async fn upload(&self, file: UploadFile, on_progress: ProgressFn) -> Result<(), ApiError>;

    /// `DELETE /pdfs/{id}`
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// [`DocumentsApi`] over HTTP.
#[derive(Clone)]
pub struct HttpDocumentsApi {
    client: Client,
    base_url: String,
    upload_chunk_size: usize,
}

impl HttpDocumentsApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            upload_chunk_size: ClientConfig::default().upload_chunk_size,
        }
    }

    /// Build a client with the configured timeout and base URL.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::new(client, config.base_url()).with_upload_chunk_size(config.upload_chunk_size))
    }

    pub fn with_upload_chunk_size(mut self, chunk_size: usize) -> Self {
        self.upload_chunk_size = chunk_size.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-success response into [`ApiError::Status`].
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to read error body of {} response: {}", status, e);
            String::new()
        }
    };
    Err(ApiError::from_status(status, &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = check(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl DocumentsApi for HttpDocumentsApi {
    async fn list(&self) -> Result<Vec<Document>, ApiError> {
        let url = self.url("/pdfs");
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to send GET request to {}: {}", url, e);
            ApiError::from(e)
        })?;
        decode(response).await
    }

    async fn show(&self, id: &str) -> Result<DocumentDetail, ApiError> {
        let url = self.url(&format!("/pdfs/{}", id));
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to send GET request to {}: {}", url, e);
            ApiError::from(e)
        })?;
        decode(response).await
    }

    async fn upload(&self, file: UploadFile, on_progress: ProgressFn) -> Result<(), ApiError> {
        let url = self.url("/pdfs");
        let length = file.len();
        let body = Body::wrap_stream(progress_stream(
            file.bytes,
            self.upload_chunk_size,
            on_progress,
        ));
        let part = Part::stream_with_length(body, length)
            .file_name(file.name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", url, e);
                ApiError::from(e)
            })?;
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/pdfs/{}", id));
        let response = self.client.delete(&url).send().await.map_err(|e| {
            tracing::error!("Failed to send DELETE request to {}: {}", url, e);
            ApiError::from(e)
        })?;
        check(response).await?;
        Ok(())
    }
}
