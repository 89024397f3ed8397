//! # Gallery Client Library
//!
//! Client-side orchestration for an object-store image gallery: it lists the
//! stored images as a grid of cards, uploads batches of files with progress
//! feedback, and deletes images behind an inline confirmation, reloading the
//! gallery after every mutation.
//!
//! ## Architecture
//!
//! The client is built using:
//! - **Tokio**: Async runtime; startup requests run concurrently
//! - **Reqwest**: HTTP transport, including streamed multipart uploads
//! - **Serde**: JSON bodies of the gallery endpoints
//! - **Tracing**: Structured logging of every state transition
//!
//! ## Core Components
//!
//! - [`config`]: Layered configuration (embedded defaults, file, environment)
//! - [`error`]: Client error type
//! - [`types`]: Wire types of the backend endpoints
//! - [`format`]: Size formatting and markup escaping
//! - [`view`]: Headless model of the render surface
//! - [`api`]: The backend seam and its HTTP implementation
//! - [`health`]: Connectivity indicator and server banner
//! - [`gallery`]: Gallery loader and card renderer
//! - [`delete`]: Per-card delete confirmation
//! - [`upload`]: Upload flow with progress and per-file results
//! - [`modal`]: Upload dialog, drop target and file picker
//! - [`app`]: Startup orchestration and event entry points
//! - [`terminal`]: Plain-text rendering for the command line front end
//!
//! ## Failure model
//!
//! Nothing is fatal. Connectivity failures, malformed bodies and errors
//! reported by the server all end in a coherent view that the user can act
//! on again. There are no retries, timeouts or cancellation.

pub mod api;
pub mod app;
pub mod config;
pub mod delete;
pub mod error;
pub mod format;
pub mod gallery;
pub mod health;
pub mod modal;
pub mod terminal;
pub mod types;
pub mod upload;
pub mod view;

#[cfg(test)]
mod tests;
