use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::*;
use crate::upload::{ProgressObserver, UploadBatch, UploadProgress};

/// The backend contract consumed by the gallery components.
///
/// Bodies are interpreted regardless of HTTP status: the server reports
/// logical failures inside the JSON (`status`, `error`), and those are the
/// components' business. Only a missing response is an error here, plus a
/// body that is not the expected JSON (except for uploads, see
/// [`UploadResponse::from_body`]).
#[async_trait]
pub trait GalleryApi: Send + Sync {
    async fn health(&self) -> ClientResult<HealthResponse>;

    async fn info(&self) -> ClientResult<ServerInfo>;

    async fn list_images(&self) -> ClientResult<ImageListResponse>;

    /// Deletes one object. The returned body is only checked for being JSON.
    async fn delete_image(&self, key: &str) -> ClientResult<JsonValue>;

    /// Sends the whole batch in one request, reporting bytes sent to `progress`.
    async fn upload(&self, batch: UploadBatch, progress: Arc<dyn ProgressObserver>) -> ClientResult<UploadResponse>;
}

/// [`GalleryApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGalleryApi {
    client: reqwest::Client,
    base_url: String,
    field_name: String,
    chunk_size: usize,
}

impl HttpGalleryApi {
    pub fn new(cfg: &AppConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gallery-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: cfg.api.base_url.trim_end_matches('/').to_string(),
            field_name: cfg.upload.field_name.clone(),
            chunk_size: cfg.upload.chunk_size.max(1),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!("GET {} -> {} ({} bytes)", path, status, text.len());
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl GalleryApi for HttpGalleryApi {
    async fn health(&self) -> ClientResult<HealthResponse> {
        self.get_json("/api/health").await
    }

    async fn info(&self) -> ClientResult<ServerInfo> {
        self.get_json("/api/info").await
    }

    async fn list_images(&self) -> ClientResult<ImageListResponse> {
        self.get_json("/api/images").await
    }

    async fn delete_image(&self, key: &str) -> ClientResult<JsonValue> {
        let path = format!("/api/delete/{}", urlencoding::encode(key));
        let resp = self.client.delete(self.url(&path)).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!("DELETE {} -> {}", path, status);
        Ok(serde_json::from_str(&text)?)
    }

    async fn upload(&self, batch: UploadBatch, progress: Arc<dyn ProgressObserver>) -> ClientResult<UploadResponse> {
        let total = batch.total_bytes();
        let loaded = Arc::new(AtomicU64::new(0));
        let mut form = Form::new();

        for file in batch.into_files() {
            let length = file.bytes.len() as u64;
            let mime = file.content_type();
            let chunks: Vec<Vec<u8>> = file.bytes.chunks(self.chunk_size).map(<[u8]>::to_vec).collect();
            let loaded = loaded.clone();
            let progress = progress.clone();
            // Each chunk counts as sent once the transport pulls it from the stream.
            let stream = futures::stream::iter(chunks).map(move |chunk| {
                let sent = chunk.len() as u64;
                let now = loaded.fetch_add(sent, Ordering::Relaxed) + sent;
                progress.on_progress(UploadProgress { loaded: now, total: Some(total) });
                Ok::<_, std::io::Error>(chunk)
            });
            let part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), length)
                .file_name(file.filename)
                .mime_str(&mime)?;
            form = form.part(self.field_name.clone(), part);
        }

        let resp = self.client.post(self.url("/api/upload")).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!("POST /api/upload -> {} ({} bytes)", status, body.len());
        Ok(UploadResponse::from_body(&body))
    }
}
