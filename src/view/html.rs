//! HTML serialization of the dashboard.
//!
//! The element structure and class names are what the dashboard stylesheet
//! targets, so they are kept exactly as the page expects them. All
//! interpolated text is escaped.

use std::fmt::Write;

use super::{Banner, BannerKind, DashboardView};
use crate::data::{CardBody, ValidatorCard};

/// Inline style for the sample-data notice banner.
const NOTICE_STYLE: &str = "background-color: #fff3cd; color: #856404;";

/// Escape text for use in element content or a single-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for one card.
pub fn render_card(card: &ValidatorCard) -> String {
    let mut out = String::new();
    let node_id = escape(&card.node_id);
    let sample_mark = if card.sample { " (SAMPLE DATA)" } else { "" };

    out.push_str("<div class='validator'>\n");
    out.push_str("    <div class='validator-header'>\n");
    let _ = writeln!(
        out,
        "        <p class='validator-id'><a href='{}' target='_blank'>{}</a>{}</p>",
        escape(&card.explorer_url),
        node_id,
        sample_mark
    );
    out.push_str("    </div>\n");
    out.push_str("    <div class='validator-body'>\n");

    match &card.body {
        CardBody::Status(status) => {
            out.push_str("        <div class='validator-detail'>\n");
            let _ = writeln!(out, "            <span>Status: {}</span>", escape(status));
            out.push_str("        </div>\n");
        }
        CardBody::Metrics(metrics) => {
            for field in metrics.fields() {
                match field.row_class {
                    Some(class) => {
                        let _ = writeln!(out, "        <div class='validator-detail {}'>", class);
                    }
                    None => out.push_str("        <div class='validator-detail'>\n"),
                }
                let _ = writeln!(
                    out,
                    "            <span class='detail-label'>{}</span>",
                    escape(field.label)
                );
                match field.value_class {
                    Some(class) => {
                        let _ = writeln!(
                            out,
                            "            <span class='{}'>{}</span>",
                            class,
                            escape(&field.value)
                        );
                    }
                    None => {
                        let _ = writeln!(out, "            <span>{}</span>", escape(&field.value));
                    }
                }
                out.push_str("        </div>\n");
            }
        }
    }

    out.push_str("    </div>\n");
    out.push_str("</div>\n");
    out
}

/// Markup for the list area: every card, concatenated in order.
pub fn render_list(cards: &[ValidatorCard]) -> String {
    cards.iter().map(render_card).collect()
}

/// Markup for one banner.
pub fn render_banner(banner: &Banner) -> String {
    match banner.kind {
        BannerKind::Error => {
            format!("<div class=\"error-message\">{}</div>\n", escape(&banner.message))
        }
        BannerKind::Notice => format!(
            "<div class='error-message' style='{}'>{}</div>\n",
            NOTICE_STYLE,
            escape(&banner.message)
        ),
    }
}

/// Markup for the error panel.
pub fn render_banners(banners: &[Banner]) -> String {
    banners.iter().map(render_banner).collect()
}

/// The dashboard's dynamic regions, ready to drop into the page shell.
///
/// The loading indicator and the list are mutually exclusive: whichever is
/// not active is emitted with `display: none`.
pub fn render_page(view: &DashboardView) -> String {
    let hidden = " style=\"display: none;\"";
    let (loading_style, list_style) = if view.is_loading() {
        ("", hidden)
    } else {
        (hidden, "")
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<div id=\"loading\"{}>Loading validator data...</div>",
        loading_style
    );
    out.push_str("<div id=\"error-container\">\n");
    out.push_str(&render_banners(view.banners()));
    out.push_str("</div>\n");
    let _ = writeln!(out, "<div id=\"validators\"{}>", list_style);
    out.push_str(&render_list(view.cards()));
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{render_snapshot, sample_cards, RenderOptions, RenderOutcome};
    use crate::source::ValidatorSnapshot;
    use crate::view::ViewPort;
    use serde_json::json;

    fn cards(value: serde_json::Value) -> Vec<ValidatorCard> {
        let snapshot = ValidatorSnapshot::from_value(value).unwrap();
        match render_snapshot(&snapshot, &RenderOptions::default()) {
            RenderOutcome::Cards(cards) => cards,
            RenderOutcome::NoContent => panic!("expected cards"),
        }
    }

    #[test]
    fn test_status_card_markup() {
        let html = render_list(&cards(json!({"NodeID-A": "pending"})));
        assert!(html.contains("Status: pending"));
        assert!(html.contains(
            "<a href='https://avascan.info/staking/validator/NodeID-A' target='_blank'>NodeID-A</a>"
        ));
        assert!(!html.contains("Stake"));
        assert!(!html.contains("detail-label"));
    }

    #[test]
    fn test_detailed_card_markup() {
        let html = render_list(&cards(json!({
            "NodeID-B": {"uptime": 99, "stake_from_self": 100, "stake_from_delegations": "50"}
        })));

        for class in [
            "class='validator'",
            "class='validator-header'",
            "class='validator-id'",
            "class='validator-body'",
            "class='validator-detail'",
            "class='detail-label'",
        ] {
            assert!(html.contains(class), "missing {}", class);
        }
        assert!(html.contains("<span class='uptime-high'>99%</span>"));
        assert!(html.contains("<div class='validator-detail total-stake'>"));
        assert!(html.contains("<span>150 AVAX</span>"));
        assert!(html.contains("<span>Unknown</span>"));
    }

    #[test]
    fn test_sample_markup() {
        let html = render_list(&sample_cards(&RenderOptions::default()));
        assert_eq!(html.matches("(SAMPLE DATA)").count(), 2);
        assert_eq!(html.matches("class='validator'").count(), 2);
        assert!(html.contains("<span>7,000 AVAX</span>"));
        assert!(!html.contains("Expiration Date:"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_list(&cards(json!({
            "NodeID-<x>": "<script>alert('hi')</script>"
        })));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;hi&#39;)&lt;/script&gt;"));
        assert!(html.contains("NodeID-&lt;x&gt;"));
    }

    #[test]
    fn test_banner_markup() {
        assert_eq!(
            render_banner(&Banner::error("No validator data available.")),
            "<div class=\"error-message\">No validator data available.</div>\n"
        );
        let notice = render_banner(&Banner::notice("Showing sample data."));
        assert!(notice.contains("background-color: #fff3cd; color: #856404;"));
    }

    #[test]
    fn test_page_toggles_loading() {
        let mut view = DashboardView::new();
        let page = render_page(&view);
        assert!(page.contains("<div id=\"loading\">"));
        assert!(page.contains("<div id=\"validators\" style=\"display: none;\">"));

        view.set_loading(false);
        let page = render_page(&view);
        assert!(page.contains("<div id=\"loading\" style=\"display: none;\">"));
        assert!(page.contains("<div id=\"validators\">"));
    }
}
