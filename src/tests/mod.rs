//! Flow tests for the gallery client.
//!
//! The flows run against [`common::MockApi`], a scripted backend that counts
//! calls and replays canned answers. `http_api_tests` drives the real
//! `HttpGalleryApi` against an axum backend bound to a loopback port.
//!
//! ## Test Modules
//!
//! - **gallery_tests**: Listing outcomes, empty state and count display
//! - **health_tests**: Connectivity indicator, server banner and startup
//! - **delete_flow_tests**: Inline confirmation, cancel and restore on failure
//! - **upload_flow_tests**: Progress, per-file results and dialog auto-close
//! - **http_api_tests**: Wire contract of the HTTP transport

mod common;

mod gallery_tests;
