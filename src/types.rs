//! Wire types of the gallery backend.
//!
//! These mirror the JSON bodies of the four gallery endpoints plus the
//! server info endpoint. Every optional field is `#[serde(default)]` so that
//! partial bodies still deserialize; what a missing field *means* is decided
//! by the component that consumes the response, not here.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Body of `GET /api/info`: identity of the serving instance.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerInfo {
    pub hostname: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// One stored image, as listed by the server.
///
/// Immutable snapshot; discarded on the next gallery load.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ImageRecord {
    /// Unique storage identifier
    pub key: String,
    pub filename: String,
    /// Fetchable location of the image bytes
    pub url: String,
    pub size: u64,
    #[serde(default)]
    pub last_modified: Option<String>,
}

/// Body of `GET /api/images`.
///
/// `error` is the server's error marker. `count` is optional because an
/// error body carries no count; a body with neither is malformed.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ImageListResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

/// Per-file result of an upload batch.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UploadOutcome {
    pub filename: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl UploadOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Body of `POST /api/upload`.
///
/// A body that is not JSON at all is treated as `UploadResponse::default()`:
/// no outcomes and no top-level error.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub uploaded: Option<Vec<UploadOutcome>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResponse {
    /// Parses a raw response body, degrading to the empty result on any parse failure.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Upload response is not valid JSON ({}); treating as empty result", e);
                Self::default()
            }
        }
    }

    /// True when the server sent an outcome list, no top-level error, and no
    /// outcome in the list failed. Only then may the upload dialog close itself.
    pub fn fully_succeeded(&self) -> bool {
        self.error.is_none()
            && self
                .uploaded
                .as_ref()
                .is_some_and(|outcomes| outcomes.iter().all(UploadOutcome::succeeded))
    }
}
