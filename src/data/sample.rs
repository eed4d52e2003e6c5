//! Embedded sample cards shown when live data cannot be loaded.

use super::cards::{CardBody, CardMetrics, RenderOptions, ValidatorCard};
use super::tier::UptimeTier;

struct SampleValidator {
    node_id: &'static str,
    name: &'static str,
    location: &'static str,
    uptime: f64,
    stake_from_self: f64,
    stake_from_delegations: f64,
}

const SAMPLE_VALIDATORS: [SampleValidator; 2] = [
    SampleValidator {
        node_id: "NodeID-F3SZA2ZNdRjTBe3GYyRQFDaCXB3DyaZQQ",
        name: "Sample Validator 1",
        location: "New York, USA",
        uptime: 99.8,
        stake_from_self: 2000.0,
        stake_from_delegations: 5000.0,
    },
    SampleValidator {
        node_id: "NodeID-C6MR4QwFVyf7vxttwLFbxopJrD5ce4Mwv",
        name: "Sample Validator 2",
        location: "London, UK",
        uptime: 98.5,
        stake_from_self: 1500.0,
        stake_from_delegations: 3500.0,
    },
];

/// The fixed sample list. Every card is flagged `sample` and has no
/// expiration date row.
pub fn sample_cards(options: &RenderOptions) -> Vec<ValidatorCard> {
    SAMPLE_VALIDATORS
        .iter()
        .map(|v| ValidatorCard {
            node_id: v.node_id.to_string(),
            explorer_url: options.explorer_link(v.node_id),
            sample: true,
            body: CardBody::Metrics(CardMetrics {
                name: Some(v.name.to_string()),
                location: v.location.to_string(),
                uptime: Some(v.uptime),
                tier: UptimeTier::classify(v.uptime),
                expiration_date: None,
                stake_from_self: v.stake_from_self,
                stake_from_delegations: v.stake_from_delegations,
                stake_unit: options.stake_unit.clone(),
            }),
        })
        .collect()
}
