// Fetch-backed view state for the listing and detail screens

pub mod detail;
pub mod listing;

pub use detail::{directions_url, weekend_label, OrphanageDetailView};
pub use listing::{footer_text, MapRegion, OrphanageListing};

/// Data behind a view together with its loaded flag
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    /// Message for the user; the view can be refreshed to try again
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ViewState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}
