//! Terminal application state.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::poller::{CycleOutcome, DriverEvent};
use crate::ui::Theme;
use crate::view::{html, DashboardView};

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state for the terminal front end.
///
/// The poll driver writes into [`App::view`]; everything else here is
/// presentation state (scrolling, overlays, status messages).
pub struct App {
    pub running: bool,
    pub show_help: bool,

    // Dashboard document, updated by the poll driver
    pub view: DashboardView,
    source_description: String,

    // Scheduling info for the status bar
    pub refresh_interval: Option<Duration>,
    pub last_completed: Option<Instant>,
    pub last_outcome: Option<CycleOutcome>,
    refresh_requested: bool,

    // Navigation state
    pub scroll: u16,
    scroll_limit: u16,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App for the given source description.
    pub fn new(source_description: impl Into<String>, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            view: DashboardView::new(),
            source_description: source_description.into(),
            refresh_interval: None,
            last_completed: None,
            last_outcome: None,
            refresh_requested: false,
            scroll: 0,
            scroll_limit: 0,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        &self.source_description
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Record what the poll driver just did.
    pub fn on_driver_event(&mut self, event: DriverEvent) {
        match event {
            DriverEvent::Scheduled(period) => self.refresh_interval = Some(period),
            DriverEvent::CycleCompleted(_, CycleOutcome::Superseded) => {}
            DriverEvent::CycleCompleted(_, outcome) => {
                self.last_completed = Some(Instant::now());
                self.last_outcome = Some(outcome);
            }
            DriverEvent::CycleStarted(_) => {}
        }
    }

    /// Ask the main loop to start a cycle now.
    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
        self.set_status_message("Refreshing...".to_string());
    }

    /// Take a pending refresh request, if any.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    /// Furthest the list can scroll, as measured by the last draw.
    pub fn scroll_limit(&self) -> u16 {
        self.scroll_limit
    }

    /// Record the list's scroll limit and pull the offset back inside it.
    pub fn set_scroll_limit(&mut self, limit: u16) {
        self.scroll_limit = limit;
        self.scroll = self.scroll.min(limit);
    }

    pub fn scroll_down(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_add(n).min(self.scroll_limit);
    }

    pub fn scroll_up(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_bottom(&mut self) {
        self.scroll = self.scroll_limit;
    }

    /// Write the current dashboard as HTML.
    pub fn export_html(&self, path: &Path) -> Result<()> {
        std::fs::write(path, html::render_page(&self.view))?;
        Ok(())
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::CycleToken;

    fn app() -> App {
        App::new("test", Theme::dark())
    }

    #[test]
    fn test_new_app_is_loading() {
        let app = app();
        assert!(app.running);
        assert!(app.view.is_loading());
        assert_eq!(app.source_description(), "test");
        assert!(app.refresh_interval.is_none());
    }

    #[test]
    fn test_refresh_request_is_taken_once() {
        let mut app = app();
        assert!(!app.take_refresh_request());
        app.request_refresh();
        assert!(app.take_refresh_request());
        assert!(!app.take_refresh_request());
        assert_eq!(app.get_status_message(), Some("Refreshing..."));
    }

    #[test]
    fn test_scrolling_stays_within_limit() {
        let mut app = app();
        app.set_scroll_limit(20);
        app.scroll_up(5);
        assert_eq!(app.scroll, 0);
        app.scroll_down(3);
        assert_eq!(app.scroll, 3);
        app.scroll_bottom();
        app.scroll_down(1);
        assert_eq!(app.scroll, 20);
        app.scroll_top();
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_scroll_up_after_bottom_moves_immediately() {
        let mut app = app();
        app.set_scroll_limit(12);
        app.scroll_bottom();
        app.scroll_up(1);
        assert_eq!(app.scroll, 11);
    }

    #[test]
    fn test_shrinking_limit_pulls_scroll_back() {
        let mut app = app();
        app.set_scroll_limit(30);
        app.scroll_down(25);
        app.set_scroll_limit(10);
        assert_eq!(app.scroll, 10);
        app.scroll_up(1);
        assert_eq!(app.scroll, 9);
    }

    #[test]
    fn test_driver_events_update_status() {
        let mut app = app();
        app.on_driver_event(DriverEvent::Scheduled(Duration::from_secs(600)));
        assert_eq!(app.refresh_interval, Some(Duration::from_secs(600)));

        let mut poller = crate::poller::Poller::new(Default::default());
        let token: CycleToken = poller.begin_cycle(&mut app.view);
        app.on_driver_event(DriverEvent::CycleCompleted(token, CycleOutcome::Superseded));
        assert!(app.last_completed.is_none());

        app.on_driver_event(DriverEvent::CycleCompleted(token, CycleOutcome::NoData));
        assert_eq!(app.last_outcome, Some(CycleOutcome::NoData));
        assert!(app.last_completed.is_some());
    }

    #[test]
    fn test_export_html() {
        let app = app();
        let file = tempfile::NamedTempFile::new().unwrap();
        app.export_html(file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("<div id=\"validators\""));
    }

    #[test]
    fn test_quit_and_help() {
        let mut app = app();
        app.toggle_help();
        assert!(app.show_help);
        app.toggle_help();
        assert!(!app.show_help);
        app.quit();
        assert!(!app.running);
    }
}
