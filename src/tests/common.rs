#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crate::api::GalleryApi;
use crate::app::GalleryApp;
use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::*;
use crate::upload::{ProgressObserver, UploadBatch, UploadProgress};
use crate::view::ViewState;
use serde_json::{json, Value as JsonValue};
use tokio::sync::Notify;

/// A canned backend answer.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Body(T),
    /// No response at all.
    Transport,
    /// A response whose body is not the expected JSON.
    Malformed,
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> ClientResult<T> {
        match self {
            Reply::Body(t) => Ok(t.clone()),
            Reply::Transport => Err(ClientError::Transport("connection refused".into())),
            Reply::Malformed => Err(ClientError::Decode("expected value at line 1 column 1".into())),
        }
    }
}

/// Scripted [`GalleryApi`] that records every call.
pub struct MockApi {
    pub health: Mutex<Reply<HealthResponse>>,
    pub info: Mutex<Reply<ServerInfo>>,
    pub images: Mutex<Reply<ImageListResponse>>,
    pub delete: Mutex<Reply<JsonValue>>,
    pub upload: Mutex<Reply<UploadResponse>>,
    /// Progress reported by `upload` before it answers.
    pub progress_steps: Mutex<Vec<UploadProgress>>,
    /// When set, `upload` waits for a notification after reporting progress.
    pub upload_gate: Option<Arc<Notify>>,
    /// When set, `list_images` answers only after this long.
    pub list_delay: Option<Duration>,
    pub list_calls: AtomicUsize,
    pub deleted_keys: Mutex<Vec<String>>,
    pub uploaded_batches: Mutex<Vec<Vec<String>>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            health: Mutex::new(Reply::Body(HealthResponse { status: "healthy".into() })),
            info: Mutex::new(Reply::Transport),
            images: Mutex::new(Reply::Body(listing(&[]))),
            delete: Mutex::new(Reply::Body(json!({ "deleted": true }))),
            upload: Mutex::new(Reply::Body(UploadResponse::default())),
            progress_steps: Mutex::new(Vec::new()),
            upload_gate: None,
            list_delay: None,
            list_calls: AtomicUsize::new(0),
            deleted_keys: Mutex::new(Vec::new()),
            uploaded_batches: Mutex::new(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn with_images(images: &[ImageRecord]) -> Self {
        let api = Self::default();
        api.set_images(Reply::Body(listing(images)));
        api
    }

    pub fn set_images(&self, reply: Reply<ImageListResponse>) {
        *self.images.lock().unwrap() = reply;
    }

    pub fn set_upload(&self, reply: Reply<UploadResponse>) {
        *self.upload.lock().unwrap() = reply;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GalleryApi for MockApi {
    async fn health(&self) -> ClientResult<HealthResponse> {
        self.health.lock().unwrap().get()
    }

    async fn info(&self) -> ClientResult<ServerInfo> {
        self.info.lock().unwrap().get()
    }

    async fn list_images(&self) -> ClientResult<ImageListResponse> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        self.images.lock().unwrap().get()
    }

    async fn delete_image(&self, key: &str) -> ClientResult<JsonValue> {
        self.deleted_keys.lock().unwrap().push(key.to_string());
        let reply = self.delete.lock().unwrap().get();
        if reply.is_ok() {
            // The store forgets the object, so the next listing no longer has it.
            let mut images = self.images.lock().unwrap();
            if let Reply::Body(list) = &mut *images {
                list.images.retain(|img| img.key != key);
                list.count = Some(list.images.len() as u64);
            }
        }
        reply
    }

    async fn upload(&self, batch: UploadBatch, progress: Arc<dyn ProgressObserver>) -> ClientResult<UploadResponse> {
        self.uploaded_batches
            .lock()
            .unwrap()
            .push(batch.files().iter().map(|f| f.filename.clone()).collect());
        let steps = self.progress_steps.lock().unwrap().clone();
        for step in steps {
            progress.on_progress(step);
            tokio::task::yield_now().await;
        }
        if let Some(gate) = &self.upload_gate {
            gate.notified().await;
        }
        self.upload.lock().unwrap().get()
    }
}

pub fn record(key: &str, filename: &str, size: u64) -> ImageRecord {
    ImageRecord {
        key: key.to_string(),
        filename: filename.to_string(),
        url: format!("/api/image/{}", key),
        size,
        last_modified: None,
    }
}

pub fn listing(images: &[ImageRecord]) -> ImageListResponse {
    ImageListResponse { error: None, count: Some(images.len() as u64), images: images.to_vec() }
}

/// Default configuration with the auto-close delay removed so tests do not sleep.
pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.upload.auto_close_delay_ms = 0;
    cfg
}

pub fn app_with(api: Arc<MockApi>) -> GalleryApp {
    GalleryApp::new(api, test_config())
}

/// Polls the view until `pred` holds, failing after a second.
pub async fn wait_for_view(app: &GalleryApp, pred: impl Fn(&ViewState) -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    loop {
        if pred(&app.snapshot().await) {
            return;
        }
        assert!(tokio::time::Instant::now() < deadline, "view never reached the expected state");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Asserts the gallery invariants: count matches the cards, and the empty state excludes the grid.
pub fn assert_gallery_consistent(view: &ViewState) {
    let g = &view.gallery;
    assert!(!(g.empty_state_visible && g.grid_visible()), "empty state and grid both visible");
    if g.grid_visible() {
        assert_eq!(g.count.to_string(), g.cards.len().to_string());
    }
}
