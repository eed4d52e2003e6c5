//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::UptimeTier;
use crate::view::BannerKind;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and links.
    pub highlight: Color,
    /// Uptime at or above the high threshold.
    pub uptime_high: Color,
    /// Uptime between the medium and high thresholds.
    pub uptime_medium: Color,
    /// Uptime below the medium threshold, or unknown.
    pub uptime_low: Color,
    /// Error banners and their border.
    pub error: Color,
    /// Notices such as the sample-data banner.
    pub notice: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headings.
    pub header: Style,
    /// Style for field labels on cards.
    pub label: Style,
    /// Style for the sample-data marker.
    pub sample: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            uptime_high: Color::Green,
            uptime_medium: Color::Yellow,
            uptime_low: Color::Red,
            error: Color::Red,
            notice: Color::Yellow,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            sample: Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            uptime_high: Color::Green,
            uptime_medium: Color::Yellow,
            uptime_low: Color::Red,
            error: Color::Red,
            notice: Color::Yellow,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            sample: Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for an uptime tier
    pub fn tier_style(&self, tier: UptimeTier) -> Style {
        match tier {
            UptimeTier::High => Style::default().fg(self.uptime_high),
            UptimeTier::Medium => Style::default().fg(self.uptime_medium),
            UptimeTier::Low => Style::default().fg(self.uptime_low).add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for a banner
    pub fn banner_style(&self, kind: BannerKind) -> Style {
        match kind {
            BannerKind::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
            BannerKind::Notice => Style::default().fg(self.notice),
        }
    }
}
