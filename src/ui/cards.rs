//! Validator card list rendering.
//!
//! Cards are drawn as a single scrollable paragraph: a title line per card
//! followed by its labelled fields, with a blank line between cards.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{CardBody, ValidatorCard};
use crate::ui::Theme;

/// Width of the label column on a card.
const LABEL_WIDTH: usize = 24;

/// Render the list area: the loading indicator while a cycle runs,
/// otherwise the cards.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Validators ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.view.is_loading() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            " Loading validator data...",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let lines = card_lines(app.view.cards(), &app.theme);

    // Lines are not wrapped, so each one is exactly one row
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.scroll.min(scroll_limit(app, area)), 0));

    frame.render_widget(paragraph, area);
}

/// How far the list in `area` can scroll before the last line reaches the
/// bottom border.
pub fn scroll_limit(app: &App, area: Rect) -> u16 {
    let visible = area.height.saturating_sub(2);
    let total = u16::try_from(card_lines(app.view.cards(), &app.theme).len()).unwrap_or(u16::MAX);
    total.saturating_sub(visible)
}

/// Build display lines for all cards.
pub fn card_lines(cards: &[ValidatorCard], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(title_line(card, theme));

        match &card.body {
            CardBody::Status(status) => {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<LABEL_WIDTH$}", "Status:"), theme.label),
                    Span::raw(status.clone()),
                ]));
            }
            CardBody::Metrics(metrics) => {
                for field in metrics.fields() {
                    let value_style = if field.value_class.is_some() {
                        theme.tier_style(metrics.tier)
                    } else if field.row_class.is_some() {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<LABEL_WIDTH$}", field.label), theme.label),
                        Span::styled(field.value, value_style),
                    ]));
                }
            }
        }
    }

    lines
}

fn title_line(card: &ValidatorCard, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled(
        card.node_id.clone(),
        Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
    )];

    if let Some(name) = card.metrics().and_then(|m| m.name.as_deref()) {
        if !card.sample {
            spans.push(Span::raw(format!("  {}", name)));
        }
    }

    if card.sample {
        spans.push(Span::styled(" (SAMPLE DATA)", theme.sample));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{render_snapshot, sample_cards, RenderOptions, RenderOutcome};
    use crate::source::ValidatorSnapshot;
    use serde_json::json;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_card_lines() {
        let snapshot = ValidatorSnapshot::from_value(json!({
            "NodeID-A": {"name": "Sensei 1", "uptime": 96, "stake_from_self": 1000},
            "NodeID-B": "pending"
        }))
        .unwrap();
        let RenderOutcome::Cards(cards) = render_snapshot(&snapshot, &RenderOptions::default())
        else {
            panic!("expected cards");
        };

        let lines = text(&card_lines(&cards, &Theme::dark()));
        assert_eq!(lines[0], "NodeID-A  Sensei 1");
        assert!(lines.iter().any(|l| l.contains("Total Stake:") && l.contains("1,000 AVAX")));
        assert!(lines.iter().any(|l| l == "NodeID-B"));
        assert!(lines.last().unwrap().contains("pending"));
    }

    #[test]
    fn test_sample_cards_are_marked() {
        let cards = sample_cards(&RenderOptions::default());
        let lines = text(&card_lines(&cards, &Theme::dark()));
        let marked = lines.iter().filter(|l| l.ends_with("(SAMPLE DATA)")).count();
        assert_eq!(marked, 2);
    }
}
