use std::sync::Arc;

use super::common::*;
use crate::types::ImageListResponse;
use crate::view::CountDisplay;

#[tokio::test]
async fn test_empty_listing_shows_empty_state() {
    let api = Arc::new(MockApi::with_images(&[]));
    let app = app_with(api.clone());
    app.refresh().await;

    let view = app.snapshot().await;
    assert!(view.gallery.cards.is_empty());
    assert!(view.gallery.empty_state_visible);
    assert_eq!(view.gallery.count.to_string(), "0");
    assert_eq!(api.list_calls(), 1);
}

#[tokio::test]
async fn test_two_images_render_in_order() {
    let a = record("images/20240101T120000_a.png", "a.png", 100);
    let b = record("images/20240101T120001_b.png", "b.png", 2048);
    let app = app_with(Arc::new(MockApi::with_images(&[a.clone(), b.clone()])));
    app.refresh().await;

    let view = app.snapshot().await;
    assert_eq!(view.gallery.cards.len(), 2);
    assert_eq!(view.gallery.cards[0].key, a.key);
    assert_eq!(view.gallery.cards[1].key, b.key);
    assert!(!view.gallery.empty_state_visible);
    assert_eq!(view.gallery.count.to_string(), "2");
    assert_eq!(view.gallery.cards[1].size_label, "2.0 KB");
    assert_gallery_consistent(&view);
}

#[tokio::test]
async fn test_error_marker_counts_as_zero() {
    let api = Arc::new(MockApi::with_images(&[record("k", "a.png", 1)]));
    let app = app_with(api.clone());
    app.refresh().await;
    assert_eq!(app.snapshot().await.gallery.cards.len(), 1);

    api.set_images(Reply::Body(ImageListResponse {
        error: Some("NoSuchBucket".into()),
        count: None,
        images: Vec::new(),
    }));
    app.refresh().await;

    let view = app.snapshot().await;
    assert!(view.gallery.cards.is_empty());
    assert!(view.gallery.empty_state_visible);
    assert_eq!(view.gallery.count, CountDisplay::Known(0));
}

#[tokio::test]
async fn test_network_failure_shows_unknown_count() {
    let api = Arc::new(MockApi::with_images(&[record("k", "a.png", 1)]));
    let app = app_with(api.clone());
    app.refresh().await;

    api.set_images(Reply::Transport);
    app.refresh().await;

    let view = app.snapshot().await;
    assert!(view.gallery.cards.is_empty());
    assert!(view.gallery.empty_state_visible);
    assert_eq!(view.gallery.count, CountDisplay::Unknown);
    assert_ne!(view.gallery.count.to_string(), "0");
}

#[tokio::test]
async fn test_malformed_listing_shows_unknown_count() {
    let api = Arc::new(MockApi::default());
    api.set_images(Reply::Malformed);
    let app = app_with(api);
    app.refresh().await;

    let view = app.snapshot().await;
    assert!(view.gallery.empty_state_visible);
    assert_eq!(view.gallery.count, CountDisplay::Unknown);
}

#[tokio::test]
async fn test_reload_replaces_grid_wholesale() {
    let api = Arc::new(MockApi::with_images(&[record("k1", "a.png", 1), record("k2", "b.png", 2), record("k3", "c.png", 3)]));
    let app = app_with(api.clone());
    app.refresh().await;
    let first = app.snapshot().await.gallery.generation;

    api.set_images(Reply::Body(listing(&[record("k3", "c.png", 3)])));
    app.refresh().await;

    let view = app.snapshot().await;
    assert!(view.gallery.generation > first);
    assert_eq!(view.gallery.cards.len(), 1);
    assert_eq!(view.gallery.cards[0].key, "k3");
    assert_eq!(view.gallery.cards[0].animation_delay_ms, 0);
    assert_gallery_consistent(&view);
}

#[tokio::test]
async fn test_repeated_loads_are_idempotent() {
    let api = Arc::new(MockApi::with_images(&[record("k1", "a.png", 1), record("k2", "b.png", 2)]));
    let app = app_with(api.clone());
    app.refresh().await;
    let first = app.snapshot().await;
    app.refresh().await;
    let second = app.snapshot().await;

    assert_eq!(first.gallery.cards, second.gallery.cards);
    assert_eq!(first.gallery.count, second.gallery.count);
    assert_eq!(api.list_calls(), 2);
}

#[tokio::test]
async fn test_hostile_filename_is_escaped_in_card() {
    let app = app_with(Arc::new(MockApi::with_images(&[record("images/x", "<img src=x onerror=alert(1)>.png", 10)])));
    app.refresh().await;

    let view = app.snapshot().await;
    let html = view.gallery.cards[0].html();
    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;.png"));
    // The raw name is still kept for non-markup front ends.
    assert_eq!(view.gallery.cards[0].filename, "<img src=x onerror=alert(1)>.png");
}
