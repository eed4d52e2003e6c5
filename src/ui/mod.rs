//! Terminal UI rendering using ratatui.
//!
//! The terminal front end draws the same [`DashboardView`](crate::view::DashboardView)
//! that the HTML front end serializes.
//!
//! ## Submodules
//!
//! - [`cards`]: The scrollable validator card list and loading indicator
//! - [`common`]: Shared components (header, banners, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Banners (common::render_banners)     │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Card list (cards::render)            │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod cards;
pub mod common;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for a usable display.
const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 10;

/// Draw one frame of the dashboard.
///
/// Also records how far the card list can scroll at the current size.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.notice));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),                          // Header bar
        Constraint::Length(common::banner_height(app)), // Banners
        Constraint::Min(5),                             // Card list
        Constraint::Length(1),                          // Status bar
    ])
    .split(area);

    // The loading indicator replaces the list, so keep the old limit
    if !app.view.is_loading() {
        let limit = cards::scroll_limit(app, chunks[2]);
        app.set_scroll_limit(limit);
    }

    common::render_header(frame, app, chunks[0]);
    common::render_banners(frame, app, chunks[1]);
    cards::render(frame, app, chunks[2]);
    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_cards, RenderOptions};
    use crate::view::{Banner, ViewPort};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_loading() {
        let mut app = App::new("test", Theme::dark());
        let text = screen(&mut app, 80, 20);
        assert!(text.contains("Loading validator data..."));
    }

    #[test]
    fn test_render_sample_fallback() {
        let mut app = App::new("test", Theme::dark());
        app.view.set_loading(false);
        app.view.show_error(Banner::error("Failed to fetch"));
        app.view.show_list(sample_cards(&RenderOptions::default()));

        let text = screen(&mut app, 100, 30);
        assert!(text.contains("Failed to fetch"));
        assert!(text.contains("(SAMPLE DATA)"));
        assert!(text.contains("2 validators"));
    }

    #[test]
    fn test_render_too_small() {
        let mut app = App::new("test", Theme::dark());
        let text = screen(&mut app, 30, 8);
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn test_scroll_up_after_end_moves_the_list() {
        let mut app = App::new("test", Theme::dark());
        app.view.set_loading(false);
        app.view.show_list(sample_cards(&RenderOptions::default()));

        // 13 card lines in an 8-row list (6 inside the border)
        screen(&mut app, 80, 10);
        assert_eq!(app.scroll_limit(), 7);

        app.scroll_bottom();
        let bottom = screen(&mut app, 80, 10);
        assert_eq!(app.scroll, 7);

        for _ in 0..5 {
            app.scroll_up(1);
        }
        let after = screen(&mut app, 80, 10);
        assert_eq!(app.scroll, 2);
        assert_ne!(bottom, after);
    }

    #[test]
    fn test_resize_clamps_scroll() {
        let mut app = App::new("test", Theme::dark());
        app.view.set_loading(false);
        app.view.show_list(sample_cards(&RenderOptions::default()));

        screen(&mut app, 80, 10);
        app.scroll_bottom();
        screen(&mut app, 80, 40);
        assert_eq!(app.scroll_limit(), 0);
        assert_eq!(app.scroll, 0);
    }
}
