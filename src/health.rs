use tracing::{debug, warn};

use crate::api::GalleryApi;
use crate::view::{Indicator, ViewHandle};

pub const CONNECTED_TEXT: &str = "connected";
pub const DISCONNECTED_TEXT: &str = "disconnected";

/// One-shot connectivity check. Only `{"status":"healthy"}` lights the indicator green;
/// any other status, a malformed body or no response turns it red.
pub async fn check_health(api: &dyn GalleryApi, view: &ViewHandle) {
    let healthy = match api.health().await {
        Ok(resp) if resp.is_healthy() => true,
        Ok(resp) => {
            warn!("Backend reports status {:?}", resp.status);
            false
        }
        Err(e) => {
            warn!("Health check failed: {}", e);
            false
        }
    };
    let mut v = view.write().await;
    if healthy {
        v.status.indicator = Indicator::Ok;
        v.status.text = CONNECTED_TEXT.to_string();
    } else {
        v.status.indicator = Indicator::Error;
        v.status.text = DISCONNECTED_TEXT.to_string();
    }
}

/// Fetches the serving instance's identity for the banner. Failures leave the banner empty.
pub async fn fetch_server_info(api: &dyn GalleryApi, view: &ViewHandle) {
    match api.info().await {
        Ok(info) => {
            debug!("Served by {}", info.hostname);
            view.write().await.server = Some(info);
        }
        Err(e) => debug!("Server info unavailable: {}", e),
    }
}
