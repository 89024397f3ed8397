//! Inline two-step delete confirmation, one state machine per card.
//!
//! `Idle -> ConfirmingDelete` on the delete click; back to `Idle` on "No" or
//! on a failed delete; on a successful delete the gallery is reloaded and the
//! card disappears with the old grid.

use tracing::{debug, info, warn};

use crate::api::GalleryApi;
use crate::gallery::load_gallery;
use crate::view::{CardHandle, ConfirmationState, GalleryView, ViewHandle};

pub const CONFIRM_PROMPT_HTML: &str = r#"<div class="confirm-delete"><span>Delete?</span><button class="btn-confirm-yes">Yes</button><button class="btn-confirm-no">No</button></div>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server accepted the delete and the gallery was reloaded.
    Deleted,
    /// The delete failed; the card shows its original metadata again.
    Restored(String),
    /// The handle no longer points at a confirming card of the current view.
    Stale,
}

/// Delete affordance clicked: swap the metadata region for the prompt.
///
/// Returns false when the handle is stale. A second click on a card that is
/// already confirming keeps the first snapshot.
pub async fn request_delete(view: &ViewHandle, card: &CardHandle) -> bool {
    let mut v = view.write().await;
    let Some(c) = v.gallery.card_mut(card) else {
        debug!("Delete click on stale card {}", card.key);
        return false;
    };
    if c.is_confirming() {
        return true;
    }
    let prior_meta = std::mem::replace(&mut c.meta_html, CONFIRM_PROMPT_HTML.to_string());
    c.confirm = ConfirmationState::ConfirmingDelete { prior_meta };
    debug!("Confirming delete of {}", card.key);
    true
}

/// "No" clicked: put the exact prior metadata back. No request is made.
pub async fn cancel_delete(view: &ViewHandle, card: &CardHandle) -> bool {
    let mut v = view.write().await;
    restore(&mut v.gallery, card)
}

/// "Yes" clicked: delete the bound key, then reload or restore.
pub async fn confirm_delete(api: &dyn GalleryApi, view: &ViewHandle, card: &CardHandle) -> DeleteOutcome {
    {
        let v = view.read().await;
        match v.gallery.card(card) {
            Some(c) if c.is_confirming() => {}
            _ => return DeleteOutcome::Stale,
        }
    }

    match api.delete_image(&card.key).await {
        Ok(_) => {
            info!("Deleted {}", card.key);
            load_gallery(api, view).await;
            DeleteOutcome::Deleted
        }
        Err(e) => {
            warn!("Deleting {} failed: {}", card.key, e);
            let mut v = view.write().await;
            restore(&mut v.gallery, card);
            DeleteOutcome::Restored(e.to_string())
        }
    }
}

fn restore(gallery: &mut GalleryView, card: &CardHandle) -> bool {
    let Some(c) = gallery.card_mut(card) else {
        return false;
    };
    match std::mem::take(&mut c.confirm) {
        ConfirmationState::ConfirmingDelete { prior_meta } => {
            c.meta_html = prior_meta;
            true
        }
        ConfirmationState::Idle => false,
    }
}
