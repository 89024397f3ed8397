//! Upload flow: one multipart request per batch, live progress, per-file results.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::GalleryApi;
use crate::config::UploadConfig;
use crate::error::{ClientError, ClientResult};
use crate::gallery::load_gallery;
use crate::modal::close_modal;
use crate::types::UploadResponse;
use crate::view::{ResultLine, ViewHandle};

/// A file blob picked or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { filename: filename.into(), bytes }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { filename, bytes })
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.filename).first_or_octet_stream().essence_str().to_string()
    }
}

/// A non-empty, ordered set of files submitted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    files: Vec<UploadFile>,
}

impl UploadBatch {
    pub fn new(files: Vec<UploadFile>) -> ClientResult<Self> {
        if files.is_empty() {
            return Err(ClientError::EmptyBatch);
        }
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes.len() as u64).sum()
    }

    pub fn into_files(self) -> Vec<UploadFile> {
        self.files
    }
}

/// Bytes of the batch handed to the transport so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl UploadProgress {
    /// `round(loaded / total * 100)`, or `None` when the total is not computable.
    pub fn percent(&self) -> Option<u8> {
        match self.total {
            Some(total) if total > 0 => {
                let pct = (self.loaded as f64 / total as f64 * 100.0).round();
                Some(pct.clamp(0.0, 100.0) as u8)
            }
            _ => None,
        }
    }
}

/// Receives progress notifications while an upload request is being sent.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: UploadProgress);
}

impl ProgressObserver for watch::Sender<UploadProgress> {
    fn on_progress(&self, progress: UploadProgress) {
        self.send_replace(progress);
    }
}

/// How an upload invocation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResult {
    /// Every file was stored and the server reported no error; the dialog auto-closes.
    Succeeded(UploadResponse),
    /// The server answered, but with a top-level error, a per-file error, or
    /// nothing usable. The dialog stays open on the results.
    Rejected(UploadResponse),
    /// No response at all.
    TransportFailed(String),
}

pub fn uploading_text(count: usize) -> String {
    format!("Uploading {} file{}...", count, if count == 1 { "" } else { "s" })
}

/// Runs the upload flow for `batch` against the dialog in `view`.
///
/// Never fails: transport failures end in the "Upload failed" state without a
/// gallery refresh; any server answer ends in "Done!" followed by a refresh.
/// When the answer reports no error at all the dialog closes after the
/// configured delay. The delay runs alongside the refresh, so a slow listing
/// does not hold the dialog open.
pub async fn upload_files(api: &dyn GalleryApi, view: &ViewHandle, batch: UploadBatch, settings: &UploadConfig) -> UploadResult {
    let count = batch.len();
    {
        let mut v = view.write().await;
        v.modal.progress_visible = true;
        v.modal.results_visible = false;
        v.modal.progress_percent = 0;
        v.modal.status_text = uploading_text(count);
    }
    debug!("Uploading batch of {} file(s), {} bytes", count, batch.total_bytes());

    let (tx, mut rx) = watch::channel(UploadProgress::default());
    let observer: Arc<dyn ProgressObserver> = Arc::new(tx);
    let request = api.upload(batch, observer.clone());
    tokio::pin!(request);

    let outcome = loop {
        tokio::select! {
            res = &mut request => break res,
            changed = rx.changed() => {
                if changed.is_err() {
                    break request.await;
                }
                let progress = *rx.borrow_and_update();
                if let Some(pct) = progress.percent() {
                    let mut v = view.write().await;
                    v.modal.progress_percent = pct;
                    v.modal.status_text = format!("Uploading... {}%", pct);
                }
            }
        }
    };
    drop(observer);

    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            warn!("Upload of {} file(s) failed: {}", count, e);
            let mut v = view.write().await;
            v.modal.status_text = "Upload failed".to_string();
            v.modal.results_visible = true;
            v.modal.results = vec![ResultLine::error(None, "Network error")];
            return UploadResult::TransportFailed(e.to_string());
        }
    };

    {
        let mut v = view.write().await;
        v.modal.progress_percent = 100;
        v.modal.results_visible = true;
        v.modal.results = result_lines(&response);
        v.modal.status_text = "Done!".to_string();
    }
    let failed = response.uploaded.as_ref().map_or(0, |o| o.iter().filter(|x| !x.succeeded()).count());
    info!(
        "Upload finished: {} outcome(s), {} failed, top-level error: {}",
        response.uploaded.as_ref().map_or(0, Vec::len),
        failed,
        response.error.as_deref().unwrap_or("none")
    );

    let succeeded = response.fully_succeeded();
    let auto_close = async {
        if succeeded {
            tokio::time::sleep(settings.auto_close_delay()).await;
            close_modal(view).await;
        }
    };
    tokio::join!(load_gallery(api, view), auto_close);

    if succeeded {
        UploadResult::Succeeded(response)
    } else {
        UploadResult::Rejected(response)
    }
}

/// One line per outcome when the server sent a list, else the top-level error, else nothing.
pub fn result_lines(response: &UploadResponse) -> Vec<ResultLine> {
    if let Some(outcomes) = &response.uploaded {
        outcomes
            .iter()
            .map(|o| match &o.error {
                None => ResultLine::success(&o.filename),
                Some(err) => ResultLine::error(Some(&o.filename), err),
            })
            .collect()
    } else if let Some(err) = &response.error {
        vec![ResultLine::error(None, err)]
    } else {
        Vec::new()
    }
}
