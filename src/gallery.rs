//! Gallery loader and card renderer.
//!
//! Every load replaces the whole grid; nothing is patched in place.

use tracing::{debug, warn};

use crate::api::GalleryApi;
use crate::format::{escape_html, format_size};
use crate::types::{ImageListResponse, ImageRecord};
use crate::view::{Card, CardHandle, ConfirmationState, CountDisplay, GalleryView, ViewHandle};

/// Stagger between the entrance animations of consecutive cards.
pub const CARD_STAGGER_MS: u64 = 50;

const TRASH_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="3 6 5 6 21 6"/><path d="M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6m3 0V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2"/></svg>"#;

/// Fetches the image list and redraws the gallery from it.
///
/// - error marker in the body: empty state, count `0`
/// - `count == 0` (or no images): empty state, count `0`
/// - otherwise: grid of cards, count = number of cards
/// - no response or malformed body: empty state, count unknown
pub async fn load_gallery(api: &dyn GalleryApi, view: &ViewHandle) {
    let listing = api.list_images().await;
    let mut v = view.write().await;
    match listing {
        Ok(list) => apply_listing(&mut v.gallery, list),
        Err(e) => {
            warn!("Loading gallery failed: {}", e);
            v.gallery.show_empty(CountDisplay::Unknown);
        }
    }
}

fn apply_listing(gallery: &mut GalleryView, list: ImageListResponse) {
    if let Some(err) = list.error {
        warn!("Server reported an error listing images: {}", err);
        gallery.show_empty(CountDisplay::Known(0));
        return;
    }
    let Some(count) = list.count else {
        warn!("Image list response carries neither count nor error");
        gallery.show_empty(CountDisplay::Unknown);
        return;
    };
    if count == 0 || list.images.is_empty() {
        if count != 0 {
            warn!("Server reported count {} but sent no images", count);
        }
        gallery.show_empty(CountDisplay::Known(0));
        return;
    }
    if count as usize != list.images.len() {
        warn!("Server reported count {} for {} images; showing the images", count, list.images.len());
    }
    render(gallery, &list.images);
}

/// Builds one card per record, in order, then wires the delete affordances.
///
/// Handles are minted from the grid after all cards were inserted, so none of
/// them can point at a card that is not part of the current view.
pub fn render(gallery: &mut GalleryView, images: &[ImageRecord]) -> Vec<CardHandle> {
    let cards: Vec<Card> = images.iter().enumerate().map(|(i, img)| build_card(i, img)).collect();
    let handles = gallery.replace_cards(cards);
    debug!("Rendered {} card(s), generation {}", handles.len(), gallery.generation);
    handles
}

pub fn build_card(index: usize, img: &ImageRecord) -> Card {
    let filename = escape_html(&img.filename);
    let size_label = format_size(img.size);
    let title = match &img.last_modified {
        Some(ts) => format!("{} ({})", filename, escape_html(ts)),
        None => filename.clone(),
    };
    let thumb_html = format!(
        r#"<img class="thumb" src="{}" alt="{}" loading="lazy">"#,
        escape_html(&img.url),
        filename
    );
    let meta_html = format!(
        r#"<span class="card-filename" title="{}">{}</span><span class="card-size">{}</span>"#,
        title, filename, size_label
    );
    let delete_html = format!(
        r#"<button class="btn-delete" data-key="{}" title="Delete">{}</button>"#,
        escape_html(&img.key),
        TRASH_ICON
    );
    Card {
        key: img.key.clone(),
        filename: img.filename.clone(),
        size_label,
        thumb_html,
        meta_html,
        delete_html,
        animation_delay_ms: index as u64 * CARD_STAGGER_MS,
        confirm: ConfirmationState::Idle,
    }
}
