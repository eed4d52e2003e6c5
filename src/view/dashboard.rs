use super::{Banner, ListContents, ViewPort};
use crate::data::{CardSummary, ValidatorCard};

/// In-memory dashboard document.
///
/// Holds exactly what a page would show: the loading flag, the banners in
/// the error panel, and the cards in the list area. Starts in the loading
/// state with nothing rendered.
#[derive(Debug, Clone)]
pub struct DashboardView {
    loading: bool,
    banners: Vec<Banner>,
    cards: Vec<ValidatorCard>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            loading: true,
            banners: Vec::new(),
            cards: Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn cards(&self) -> &[ValidatorCard] {
        &self.cards
    }

    pub fn summary(&self) -> CardSummary {
        CardSummary::from_cards(&self.cards)
    }
}

impl ViewPort for DashboardView {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn show_list(&mut self, cards: Vec<ValidatorCard>) {
        self.cards = cards;
    }

    fn show_error(&mut self, banner: Banner) {
        self.banners.clear();
        self.banners.push(banner);
    }

    fn push_banner(&mut self, banner: Banner) {
        self.banners.push(banner);
    }

    fn clear_error(&mut self) {
        self.banners.clear();
    }

    fn list_contents(&self) -> ListContents {
        if self.cards.is_empty() {
            ListContents::Empty
        } else if self.cards.iter().all(|c| c.sample) {
            ListContents::Sample
        } else {
            ListContents::Live
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_cards, RenderOptions};
    use crate::view::BannerKind;

    #[test]
    fn test_starts_loading_and_empty() {
        let view = DashboardView::new();
        assert!(view.is_loading());
        assert!(view.banners().is_empty());
        assert_eq!(view.list_contents(), ListContents::Empty);
    }

    #[test]
    fn test_show_error_replaces_banners() {
        let mut view = DashboardView::new();
        view.show_error(Banner::error("first"));
        view.push_banner(Banner::notice("extra"));
        view.show_error(Banner::error("second"));

        assert_eq!(view.banners().len(), 1);
        assert_eq!(view.banners()[0].message, "second");
        assert_eq!(view.banners()[0].kind, BannerKind::Error);

        view.clear_error();
        assert!(view.banners().is_empty());
    }

    #[test]
    fn test_list_contents_tracks_sample() {
        let mut view = DashboardView::new();
        view.show_list(sample_cards(&RenderOptions::default()));
        assert_eq!(view.list_contents(), ListContents::Sample);

        let mut live = sample_cards(&RenderOptions::default());
        live.iter_mut().for_each(|c| c.sample = false);
        view.show_list(live);
        assert_eq!(view.list_contents(), ListContents::Live);

        view.show_list(Vec::new());
        assert_eq!(view.list_contents(), ListContents::Empty);
    }
}
