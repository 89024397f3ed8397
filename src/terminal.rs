//! Plain-text rendering of a [`ViewState`] for the terminal front end.

use std::fmt::Write as _;

use crate::view::{Indicator, ModalView, ViewState};

const BAR_WIDTH: usize = 20;

pub fn render(view: &ViewState) -> String {
    let mut out = String::new();

    let dot = match view.status.indicator {
        Indicator::Pending => "○",
        Indicator::Ok => "●",
        Indicator::Error => "✗",
    };
    let _ = write!(out, "{} {}", dot, printable(&view.status.text));
    if let Some(info) = &view.server {
        let _ = write!(out, "  [{}", printable(&info.hostname));
        if let Some(bucket) = &info.bucket {
            let _ = write!(out, " / {}", printable(bucket));
        }
        out.push(']');
    }
    out.push('\n');

    let _ = writeln!(out, "Images: {}", view.gallery.count);
    if view.gallery.empty_state_visible {
        out.push_str("  No images yet. Upload some to get started.\n");
    }
    for card in &view.gallery.cards {
        if card.is_confirming() {
            let _ = writeln!(out, "  {:<40} Delete? [y/N]", printable(&card.filename));
        } else {
            let _ = writeln!(
                out,
                "  {:<40} {:>10}  {}",
                printable(&card.filename),
                card.size_label,
                printable(&card.key)
            );
        }
    }

    if view.modal.active {
        out.push_str("\nUpload\n");
        if view.modal.progress_visible {
            let _ = writeln!(out, "  {} {}", progress_bar(view.modal.progress_percent), printable(&view.modal.status_text));
        }
    }
    if view.modal.active && view.modal.results_visible {
        out.push_str(&render_results(&view.modal));
    }
    out
}

/// The results region, one line per entry.
pub fn render_results(modal: &ModalView) -> String {
    modal
        .results
        .iter()
        .map(|line| format!("  {} {}\n", line.marker(), printable(&line.text)))
        .collect()
}

/// Server-supplied text with control characters written as escapes, so that
/// names cannot move the cursor or retitle the terminal.
fn printable(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

fn progress_bar(percent: u8) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("[{}{}] {:>3}%", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled), percent)
}
