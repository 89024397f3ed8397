use std::sync::Arc;

use crate::api::{GalleryApi, HttpGalleryApi};
use crate::config::AppConfig;
use crate::delete::{self, DeleteOutcome};
use crate::error::ClientResult;
use crate::gallery::load_gallery;
use crate::health::{check_health, fetch_server_info};
use crate::modal::{self, OverlayClick};
use crate::upload::{upload_files, UploadBatch, UploadFile, UploadResult};
use crate::view::{new_view, CardHandle, ViewHandle, ViewState};

/// The gallery client: one backend, one view, and the user events that drive them.
///
/// Cloning is cheap and every clone drives the same view, so event handlers
/// can be spawned as independent tasks.
#[derive(Clone)]
pub struct GalleryApp {
    api: Arc<dyn GalleryApi>,
    view: ViewHandle,
    config: Arc<AppConfig>,
}

impl GalleryApp {
    pub fn new(api: Arc<dyn GalleryApi>, config: AppConfig) -> Self {
        Self { api, view: new_view(), config: Arc::new(config) }
    }

    pub fn with_http(config: AppConfig) -> ClientResult<Self> {
        let api = HttpGalleryApi::new(&config)?;
        Ok(Self::new(Arc::new(api), config))
    }

    pub fn view(&self) -> ViewHandle {
        self.view.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> ViewState {
        self.view.read().await.clone()
    }

    /// Startup: health, server info and the first gallery load run concurrently.
    /// Each writes a disjoint region of the view.
    pub async fn start(&self) {
        let api = self.api.as_ref();
        tokio::join!(
            check_health(api, &self.view),
            fetch_server_info(api, &self.view),
            load_gallery(api, &self.view),
        );
    }

    pub async fn refresh(&self) {
        load_gallery(self.api.as_ref(), &self.view).await;
    }

    pub async fn card_for(&self, key: &str) -> Option<CardHandle> {
        self.view.read().await.gallery.handle_for(key)
    }

    pub async fn request_delete(&self, card: &CardHandle) -> bool {
        delete::request_delete(&self.view, card).await
    }

    pub async fn cancel_delete(&self, card: &CardHandle) -> bool {
        delete::cancel_delete(&self.view, card).await
    }

    pub async fn confirm_delete(&self, card: &CardHandle) -> DeleteOutcome {
        delete::confirm_delete(self.api.as_ref(), &self.view, card).await
    }

    pub async fn open_modal(&self) {
        modal::open_modal(&self.view).await;
    }

    pub async fn close_modal(&self) {
        modal::close_modal(&self.view).await;
    }

    pub async fn overlay_click(&self, target: OverlayClick) {
        modal::overlay_click(&self.view, target).await;
    }

    pub async fn drag_over(&self) {
        modal::drag_over(&self.view).await;
    }

    pub async fn drag_leave(&self) {
        modal::drag_leave(&self.view).await;
    }

    pub async fn drop_files(&self, files: Vec<UploadFile>) -> Option<UploadResult> {
        modal::drop_files(self.api.as_ref(), &self.view, files, &self.config.upload).await
    }

    pub async fn pick_files(&self, files: Vec<UploadFile>) -> Option<UploadResult> {
        modal::pick_files(self.api.as_ref(), &self.view, files, &self.config.upload).await
    }

    pub async fn upload(&self, batch: UploadBatch) -> UploadResult {
        upload_files(self.api.as_ref(), &self.view, batch, &self.config.upload).await
    }
}
