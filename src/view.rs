//! Headless model of the render surface.
//!
//! A [`ViewState`] owns everything a front end draws: the connectivity
//! indicator, the server banner, the card grid with its empty state and
//! count, and the upload dialog. Components never keep their own copies of
//! this state; they receive a [`ViewHandle`] and replace the regions they own.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::format::escape_html;
use crate::types::ServerInfo;

/// Shared handle to the single view. The lock is never held across a network await.
pub type ViewHandle = Arc<RwLock<ViewState>>;

pub fn new_view() -> ViewHandle {
    Arc::new(RwLock::new(ViewState::default()))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub status: StatusView,
    pub server: Option<ServerInfo>,
    pub gallery: GalleryView,
    pub modal: ModalView,
}

/// State of the connectivity dot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indicator {
    /// No health answer yet.
    #[default]
    Pending,
    Ok,
    Error,
}

impl Indicator {
    pub fn css_class(&self) -> &'static str {
        match self {
            Indicator::Pending => "status-dot",
            Indicator::Ok => "status-dot status-dot--ok",
            Indicator::Error => "status-dot status-dot--error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusView {
    pub indicator: Indicator,
    pub text: String,
}

/// Content of the count display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountDisplay {
    #[default]
    Pending,
    Known(usize),
    /// The list could not be fetched; distinct from a legitimate zero.
    Unknown,
}

impl fmt::Display for CountDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountDisplay::Pending => write!(f, ""),
            CountDisplay::Known(n) => write!(f, "{}", n),
            CountDisplay::Unknown => write!(f, "—"),
        }
    }
}

/// Per-card delete confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmationState {
    #[default]
    Idle,
    /// The metadata region shows the prompt; `prior_meta` is what it showed before.
    ConfirmingDelete { prior_meta: String },
}

/// One rendered image card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub key: String,
    pub filename: String,
    pub size_label: String,
    pub thumb_html: String,
    /// Markup of the metadata region; replaced by the confirmation prompt while confirming.
    pub meta_html: String,
    pub delete_html: String,
    pub animation_delay_ms: u64,
    pub confirm: ConfirmationState,
}

impl Card {
    pub fn html(&self) -> String {
        format!(
            r#"<div class="image-card" style="animation-delay: {delay}ms">{thumb}<div class="card-info"><div class="card-meta">{meta}</div>{delete}</div></div>"#,
            delay = self.animation_delay_ms,
            thumb = self.thumb_html,
            meta = self.meta_html,
            delete = self.delete_html,
        )
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.confirm, ConfirmationState::ConfirmingDelete { .. })
    }
}

/// A delete affordance bound to one card of one render pass.
///
/// Handles are minted only after a render pass has inserted all of its
/// cards. A handle from an earlier pass no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHandle {
    pub generation: u64,
    pub index: usize,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryView {
    pub cards: Vec<Card>,
    /// Bumped by every render pass and every clear.
    pub generation: u64,
    pub empty_state_visible: bool,
    pub count: CountDisplay,
}

impl GalleryView {
    pub fn grid_visible(&self) -> bool {
        !self.cards.is_empty()
    }

    /// Clears the grid and shows the empty state with the given count.
    pub fn show_empty(&mut self, count: CountDisplay) {
        self.generation += 1;
        self.cards.clear();
        self.empty_state_visible = true;
        self.count = count;
    }

    /// Replaces the grid wholesale and returns the handles of the new cards.
    pub fn replace_cards(&mut self, cards: Vec<Card>) -> Vec<CardHandle> {
        self.generation += 1;
        self.empty_state_visible = cards.is_empty();
        self.count = CountDisplay::Known(cards.len());
        self.cards = cards;
        self.handles()
    }

    pub fn handles(&self) -> Vec<CardHandle> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| CardHandle { generation: self.generation, index, key: card.key.clone() })
            .collect()
    }

    pub fn handle_for(&self, key: &str) -> Option<CardHandle> {
        self.handles().into_iter().find(|h| h.key == key)
    }

    pub fn card(&self, handle: &CardHandle) -> Option<&Card> {
        if handle.generation != self.generation {
            return None;
        }
        self.cards.get(handle.index).filter(|c| c.key == handle.key)
    }

    pub fn card_mut(&mut self, handle: &CardHandle) -> Option<&mut Card> {
        if handle.generation != self.generation {
            return None;
        }
        self.cards.get_mut(handle.index).filter(|c| c.key == handle.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Success,
    Error,
}

/// One line of the upload results region. Text is kept raw and escaped on rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine {
    pub kind: ResultKind,
    pub text: String,
}

impl ResultLine {
    pub fn success(filename: &str) -> Self {
        Self { kind: ResultKind::Success, text: filename.to_string() }
    }

    pub fn error(filename: Option<&str>, detail: &str) -> Self {
        let text = match filename {
            Some(name) => format!("{} — {}", name, detail),
            None => detail.to_string(),
        };
        Self { kind: ResultKind::Error, text }
    }

    pub fn marker(&self) -> &'static str {
        match self.kind {
            ResultKind::Success => "✓",
            ResultKind::Error => "✗",
        }
    }

    pub fn html(&self) -> String {
        let class = match self.kind {
            ResultKind::Success => "success",
            ResultKind::Error => "error",
        };
        format!(
            r#"<div class="upload-result-item {}">{} {}</div>"#,
            class,
            self.marker(),
            escape_html(&self.text)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalView {
    pub active: bool,
    pub drop_zone_highlighted: bool,
    pub progress_visible: bool,
    pub progress_percent: u8,
    pub status_text: String,
    pub results_visible: bool,
    pub results: Vec<ResultLine>,
}

impl ModalView {
    pub fn results_html(&self) -> String {
        self.results.iter().map(ResultLine::html).collect()
    }
}
