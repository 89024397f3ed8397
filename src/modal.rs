//! Upload dialog: open/close, drop target and file picker.

use tracing::debug;

use crate::api::GalleryApi;
use crate::config::UploadConfig;
use crate::upload::{upload_files, UploadBatch, UploadFile, UploadResult};
use crate::view::ViewHandle;

/// Where a click inside the dialog overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    Backdrop,
    Content,
}

/// Activates the dialog with hidden progress and an empty results region.
pub async fn open_modal(view: &ViewHandle) {
    let mut v = view.write().await;
    v.modal.active = true;
    v.modal.progress_visible = false;
    v.modal.results_visible = false;
    v.modal.results.clear();
    v.modal.progress_percent = 0;
}

/// Deactivates the dialog. An upload in flight keeps running and keeps writing its results.
pub async fn close_modal(view: &ViewHandle) {
    view.write().await.modal.active = false;
}

pub async fn overlay_click(view: &ViewHandle, target: OverlayClick) {
    if target == OverlayClick::Backdrop {
        close_modal(view).await;
    }
}

pub async fn drag_over(view: &ViewHandle) {
    view.write().await.modal.drop_zone_highlighted = true;
}

pub async fn drag_leave(view: &ViewHandle) {
    view.write().await.modal.drop_zone_highlighted = false;
}

/// Files dropped on the drop zone. Starts an upload unless nothing was dropped.
pub async fn drop_files(
    api: &dyn GalleryApi,
    view: &ViewHandle,
    files: Vec<UploadFile>,
    settings: &UploadConfig,
) -> Option<UploadResult> {
    drag_leave(view).await;
    start_upload(api, view, files, settings).await
}

/// Files chosen in the picker. The selection is consumed, so the same files can be picked again.
pub async fn pick_files(
    api: &dyn GalleryApi,
    view: &ViewHandle,
    files: Vec<UploadFile>,
    settings: &UploadConfig,
) -> Option<UploadResult> {
    start_upload(api, view, files, settings).await
}

async fn start_upload(
    api: &dyn GalleryApi,
    view: &ViewHandle,
    files: Vec<UploadFile>,
    settings: &UploadConfig,
) -> Option<UploadResult> {
    match UploadBatch::new(files) {
        Ok(batch) => Some(upload_files(api, view, batch, settings).await),
        Err(_) => {
            debug!("No files selected; nothing to upload");
            None
        }
    }
}
