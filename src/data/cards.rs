//! Card view-models built from a validator snapshot.
//!
//! Rendering is split in two: this module shapes data into typed cards, and
//! the view adapters ([`crate::view::html`], [`crate::ui`]) decide how a card
//! looks. Every card is built independently, so a malformed entry can only
//! ever affect its own card.

use super::format::{format_stake, format_uptime};
use super::tier::UptimeTier;
use crate::source::{ValidatorDetails, ValidatorEntry, ValidatorSnapshot};

/// Default explorer page prefix for a validator's node id.
pub const DEFAULT_EXPLORER_URL: &str = "https://avascan.info/staking/validator/";

/// Default unit appended to stake amounts.
pub const DEFAULT_STAKE_UNIT: &str = "AVAX";

/// Fallback text for missing location and expiration date.
const UNKNOWN: &str = "Unknown";

/// Presentation settings shared by all cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix the node id is appended to for the explorer link.
    pub explorer_url: String,
    /// Unit label shown after stake amounts.
    pub stake_unit: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            stake_unit: DEFAULT_STAKE_UNIT.to_string(),
        }
    }
}

impl RenderOptions {
    /// Explorer link for a node id.
    pub fn explorer_link(&self, node_id: &str) -> String {
        format!("{}{}", self.explorer_url, node_id)
    }
}

/// Result of rendering a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// One card per entry, in snapshot order.
    Cards(Vec<ValidatorCard>),
    /// The snapshot had no entries.
    NoContent,
}

/// One validator card.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorCard {
    pub node_id: String,
    pub explorer_url: String,
    /// Set for the embedded sample entries.
    pub sample: bool,
    pub body: CardBody,
}

/// What the card shows below its header.
#[derive(Debug, Clone, PartialEq)]
pub enum CardBody {
    /// Just a status string.
    Status(String),
    /// Full metrics.
    Metrics(CardMetrics),
}

/// Normalized metrics shown on a full card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardMetrics {
    pub name: Option<String>,
    pub location: String,
    pub uptime: Option<f64>,
    pub tier: UptimeTier,
    /// `None` hides the row entirely (sample cards have no expiration).
    pub expiration_date: Option<String>,
    pub stake_from_self: f64,
    pub stake_from_delegations: f64,
    pub stake_unit: String,
}

/// A labelled row on a card, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub label: &'static str,
    pub value: String,
    /// Class on the value element (the uptime tier).
    pub value_class: Option<&'static str>,
    /// Extra class on the row element (the total stake row).
    pub row_class: Option<&'static str>,
}

impl CardField {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            value_class: None,
            row_class: None,
        }
    }
}

impl CardMetrics {
    pub fn total_stake(&self) -> f64 {
        self.stake_from_self + self.stake_from_delegations
    }

    /// Display rows in card order.
    pub fn fields(&self) -> Vec<CardField> {
        let mut fields = vec![
            CardField::plain("Location:", self.location.clone()),
            CardField {
                label: "Uptime:",
                value: format!("{}%", format_uptime(self.uptime)),
                value_class: Some(self.tier.css_class()),
                row_class: None,
            },
        ];

        if let Some(expiration) = &self.expiration_date {
            fields.push(CardField::plain("Expiration Date:", expiration.clone()));
        }

        fields.push(CardField::plain(
            "Stake from Self:",
            self.stake_text(self.stake_from_self),
        ));
        fields.push(CardField::plain(
            "Stake from Delegations:",
            self.stake_text(self.stake_from_delegations),
        ));
        fields.push(CardField {
            label: "Total Stake:",
            value: self.stake_text(self.total_stake()),
            value_class: None,
            row_class: Some("total-stake"),
        });

        fields
    }

    fn stake_text(&self, amount: f64) -> String {
        format!("{} {}", format_stake(amount), self.stake_unit)
    }
}

impl ValidatorCard {
    /// Build the card for one snapshot entry.
    pub fn from_entry(node_id: &str, entry: &ValidatorEntry, options: &RenderOptions) -> Self {
        let body = match entry {
            ValidatorEntry::StatusOnly(status) => CardBody::Status(status.clone()),
            ValidatorEntry::Detailed(details) => {
                CardBody::Metrics(CardMetrics::from_details(details, options))
            }
        };

        Self {
            node_id: node_id.to_string(),
            explorer_url: options.explorer_link(node_id),
            sample: false,
            body,
        }
    }

    pub fn metrics(&self) -> Option<&CardMetrics> {
        match &self.body {
            CardBody::Metrics(metrics) => Some(metrics),
            CardBody::Status(_) => None,
        }
    }
}

impl CardMetrics {
    fn from_details(details: &ValidatorDetails, options: &RenderOptions) -> Self {
        Self {
            name: details.name.clone(),
            location: details.location.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            uptime: details.uptime,
            tier: UptimeTier::classify_opt(details.uptime),
            expiration_date: Some(
                details.expiration_date.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            ),
            stake_from_self: details.stake_from_self,
            stake_from_delegations: details.stake_from_delegations,
            stake_unit: options.stake_unit.clone(),
        }
    }
}

/// Turn a snapshot into cards, or report that there is nothing to show.
pub fn render_snapshot(snapshot: &ValidatorSnapshot, options: &RenderOptions) -> RenderOutcome {
    if snapshot.is_empty() {
        return RenderOutcome::NoContent;
    }

    let cards = snapshot
        .iter()
        .map(|(node_id, entry)| ValidatorCard::from_entry(node_id, entry, options))
        .collect();

    RenderOutcome::Cards(cards)
}

/// Aggregate figures over a list of cards, for headers and summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardSummary {
    pub validators: usize,
    pub status_only: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total_stake: f64,
}

impl CardSummary {
    pub fn from_cards(cards: &[ValidatorCard]) -> Self {
        let mut summary = Self {
            validators: cards.len(),
            ..Self::default()
        };

        for card in cards {
            match &card.body {
                CardBody::Status(_) => summary.status_only += 1,
                CardBody::Metrics(metrics) => {
                    match metrics.tier {
                        UptimeTier::High => summary.high += 1,
                        UptimeTier::Medium => summary.medium += 1,
                        UptimeTier::Low => summary.low += 1,
                    }
                    summary.total_stake += metrics.total_stake();
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> ValidatorSnapshot {
        ValidatorSnapshot::from_value(value).unwrap()
    }

    fn cards(value: serde_json::Value) -> Vec<ValidatorCard> {
        match render_snapshot(&snapshot(value), &RenderOptions::default()) {
            RenderOutcome::Cards(cards) => cards,
            RenderOutcome::NoContent => panic!("expected cards"),
        }
    }

    #[test]
    fn test_empty_snapshot_is_no_content() {
        let outcome = render_snapshot(&ValidatorSnapshot::new(), &RenderOptions::default());
        assert_eq!(outcome, RenderOutcome::NoContent);
    }

    #[test]
    fn test_status_only_card() {
        let cards = cards(json!({"NodeID-A": "pending"}));
        assert_eq!(cards.len(), 1);

        let card = &cards[0];
        assert_eq!(card.node_id, "NodeID-A");
        assert!(card.explorer_url.contains("NodeID-A"));
        assert_eq!(card.body, CardBody::Status("pending".to_string()));
        assert!(card.metrics().is_none());
        assert!(!card.sample);
    }

    #[test]
    fn test_detailed_card_totals_and_tier() {
        let cards = cards(json!({
            "NodeID-B": {"uptime": 99, "stake_from_self": 100, "stake_from_delegations": "50"}
        }));

        let metrics = cards[0].metrics().unwrap();
        assert_eq!(metrics.tier, UptimeTier::High);
        assert_eq!(metrics.total_stake(), 150.0);

        let fields = metrics.fields();
        let total = fields.iter().find(|f| f.label == "Total Stake:").unwrap();
        assert_eq!(total.value, format!("{} AVAX", format_stake(150.0)));
        assert_eq!(total.row_class, Some("total-stake"));

        let uptime = fields.iter().find(|f| f.label == "Uptime:").unwrap();
        assert_eq!(uptime.value, "99%");
        assert_eq!(uptime.value_class, Some("uptime-high"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cards = cards(json!({"NodeID-C": {"uptime": 91.25}}));
        let metrics = cards[0].metrics().unwrap();
        assert_eq!(metrics.location, "Unknown");
        assert_eq!(metrics.expiration_date.as_deref(), Some("Unknown"));
        assert_eq!(metrics.tier, UptimeTier::Medium);

        let labels: Vec<&str> = metrics.fields().iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec![
                "Location:",
                "Uptime:",
                "Expiration Date:",
                "Stake from Self:",
                "Stake from Delegations:",
                "Total Stake:",
            ]
        );
    }

    #[test]
    fn test_malformed_entry_does_not_affect_others() {
        let cards = cards(json!({
            "NodeID-1": {"uptime": 97, "stake_from_self": 10, "stake_from_delegations": 5},
            "NodeID-2": {"uptime": "broken", "stake_from_self": "lots"},
            "NodeID-3": "unavailable"
        }));

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].metrics().unwrap().total_stake(), 15.0);

        let broken = cards[1].metrics().unwrap();
        assert_eq!(broken.tier, UptimeTier::Low);
        assert_eq!(broken.total_stake(), 0.0);
        assert_eq!(broken.fields()[1].value, "N/A%");

        assert_eq!(cards[2].body, CardBody::Status("unavailable".to_string()));
    }

    #[test]
    fn test_custom_render_options() {
        let options = RenderOptions {
            explorer_url: "https://explorer.example/v/".to_string(),
            stake_unit: "FUJI".to_string(),
        };
        let snapshot = snapshot(json!({"NodeID-X": {"uptime": 50, "stake_from_self": 1}}));
        let RenderOutcome::Cards(cards) = render_snapshot(&snapshot, &options) else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].explorer_url, "https://explorer.example/v/NodeID-X");
        assert_eq!(cards[0].metrics().unwrap().fields()[3].value, "1 FUJI");
    }

    #[test]
    fn test_card_summary() {
        let cards = cards(json!({
            "NodeID-1": {"uptime": 99, "stake_from_self": 1000, "stake_from_delegations": 500},
            "NodeID-2": {"uptime": 92, "stake_from_self": 250},
            "NodeID-3": {"uptime": 10},
            "NodeID-4": "pending"
        }));

        let summary = CardSummary::from_cards(&cards);
        assert_eq!(summary.validators, 4);
        assert_eq!(summary.status_only, 1);
        assert_eq!((summary.high, summary.medium, summary.low), (1, 1, 1));
        assert_eq!(summary.total_stake, 1750.0);
    }
}
