//! The boundary between the poller and whatever displays its results.
//!
//! The poller never draws anything itself. It drives a [`ViewPort`], which
//! owns the loading indicator, the banner panel and the card list.
//! [`DashboardView`] is the in-memory implementation shared by every front
//! end: [`html`] serializes it to markup and [`crate::ui`] draws it in a
//! terminal.

mod dashboard;
pub mod html;

pub use dashboard::DashboardView;

use crate::data::ValidatorCard;

/// What the list area currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContents {
    /// Nothing has been rendered yet.
    Empty,
    /// Cards from a successful fetch.
    Live,
    /// The embedded sample cards.
    Sample,
}

/// Severity of a banner in the error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// A failed or empty fetch.
    Error,
    /// Secondary notice, e.g. that sample data is on screen.
    Notice,
}

/// A message shown in the error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Notice,
            message: message.into(),
        }
    }
}

/// Display operations the poller needs.
pub trait ViewPort {
    /// Show the loading indicator and hide the list, or the reverse.
    fn set_loading(&mut self, loading: bool);

    /// Replace the list area with `cards`.
    fn show_list(&mut self, cards: Vec<ValidatorCard>);

    /// Replace the error panel with a single banner.
    fn show_error(&mut self, banner: Banner);

    /// Append a banner below whatever the panel already shows.
    fn push_banner(&mut self, banner: Banner);

    /// Empty the error panel.
    fn clear_error(&mut self);

    /// What the list area currently holds.
    fn list_contents(&self) -> ListContents;
}
