//! Common UI components shared across the dashboard.
//!
//! This module contains the header bar, banner area, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::format::format_stake;
use crate::poller::CycleOutcome;
use crate::view::{ListContents, ViewPort};

/// Render the header bar with a validator overview.
///
/// Displays: validator count, counts per uptime tier, total stake.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(
        " VALIDATOR DASHBOARD ",
        Style::default().add_modifier(Modifier::BOLD),
    );

    if app.view.cards().is_empty() {
        let status = if app.view.is_loading() {
            "| Loading..."
        } else {
            "| No validators"
        };
        frame.render_widget(Paragraph::new(Line::from(vec![title, Span::raw(status)])), area);
        return;
    }

    let summary = app.view.summary();
    let dim = Style::default().add_modifier(Modifier::DIM);

    let count = |n: usize, style: Style| {
        if n > 0 {
            Span::styled(n.to_string(), style)
        } else {
            Span::styled("0", dim)
        }
    };

    let mut spans = vec![
        title,
        Span::raw("│ "),
        Span::styled(
            summary.validators.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" validators │ "),
        count(summary.high, Style::default().fg(app.theme.uptime_high)),
        Span::raw(" high "),
        count(summary.medium, Style::default().fg(app.theme.uptime_medium)),
        Span::raw(" medium "),
        count(
            summary.low,
            Style::default().fg(app.theme.uptime_low).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" low │ "),
        Span::raw(format!(
            "Total stake: {} {}",
            format_stake(summary.total_stake),
            app.view
                .cards()
                .iter()
                .find_map(|c| c.metrics().map(|m| m.stake_unit.clone()))
                .unwrap_or_default()
        )),
    ];

    if app.view.list_contents() == ListContents::Sample {
        spans.push(Span::styled(" │ SAMPLE DATA", app.theme.sample));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Height needed to show the current banners (zero when there are none).
pub fn banner_height(app: &App) -> u16 {
    match app.view.banners().len() {
        0 => 0,
        n => (n as u16).saturating_add(2),
    }
}

/// Render the error/notice banners above the list.
pub fn render_banners(frame: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }

    let lines: Vec<Line> = app
        .view
        .banners()
        .iter()
        .map(|banner| {
            Line::from(Span::styled(
                format!(" {}", banner.message),
                app.theme.banner_style(banner.kind),
            ))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.error));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since the last completed cycle, refresh interval,
/// available controls. Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let updated = match (app.last_completed, app.last_outcome) {
        (Some(at), Some(CycleOutcome::Rendered { .. })) => {
            format!("Updated {:.1}s ago", at.elapsed().as_secs_f64())
        }
        (Some(at), Some(_)) => format!("Last attempt {:.1}s ago", at.elapsed().as_secs_f64()),
        _ => "Waiting for first update".to_string(),
    };

    let interval = app
        .refresh_interval
        .map(|d| format!("every {}s", d.as_secs()))
        .unwrap_or_else(|| "interval pending".to_string());

    let status = format!(
        " {} | {} | {} | r:refresh e:export ?:help q:quit",
        app.source_description(),
        updated,
        interval,
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Scroll"),
        Line::from("  PgUp/PgDn   Scroll 10 lines"),
        Line::from("  Home/End    Jump to top/bottom"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to HTML"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay, clamped to the terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
