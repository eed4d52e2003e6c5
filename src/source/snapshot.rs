//! Wire types for the `/data` and `/config` endpoints.
//!
//! The server hands back loosely-typed JSON: stakes may be numbers or
//! strings, entries may be bare status strings, and fields go missing. These
//! types normalize all of that at the edge so nothing downstream has to
//! re-check the JSON. Normalization never fails for a single entry; only a
//! body that is not an object (or `null`) is rejected.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::config::DEFAULT_REFRESH_INTERVAL;
use crate::data::format::{coerce_number, coerce_stake};

/// One `/data` response: node id to entry, in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatorSnapshot {
    entries: Vec<(String, ValidatorEntry)>,
}

impl ValidatorSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from an already-parsed JSON body.
    ///
    /// `null` and `{}` are empty snapshots; any other non-object is an error.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(format!("expected a JSON object, found {}", json_kind(&other))),
        }
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(node_id, raw)| (node_id, ValidatorEntry::from_value(&raw)))
            .collect();
        Self { entries }
    }

    /// Append an entry. A repeated node id replaces the earlier entry in place.
    pub fn insert(&mut self, node_id: impl Into<String>, entry: ValidatorEntry) {
        let node_id = node_id.into();
        if let Some(slot) = self.entries.iter_mut().find(|(id, _)| *id == node_id) {
            slot.1 = entry;
        } else {
            self.entries.push((node_id, entry));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, node_id: &str) -> Option<&ValidatorEntry> {
        self.entries.iter().find(|(id, _)| id == node_id).map(|(_, entry)| entry)
    }

    /// Iterate entries in received order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidatorEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

impl<'de> Deserialize<'de> for ValidatorSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// A single validator as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorEntry {
    /// The server only knows a status string ("pending", "N/A", "Error ...").
    StatusOnly(String),
    /// Full metrics.
    Detailed(ValidatorDetails),
}

impl ValidatorEntry {
    /// Normalize a raw JSON entry. Never fails: unusable shapes become a
    /// `Detailed` entry with every field defaulted.
    pub fn from_value(raw: &Value) -> Self {
        match raw {
            Value::String(status) => ValidatorEntry::StatusOnly(status.clone()),
            Value::Object(fields) => ValidatorEntry::Detailed(ValidatorDetails::from_fields(fields)),
            _ => ValidatorEntry::Detailed(ValidatorDetails::default()),
        }
    }
}

/// Normalized metrics for a validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatorDetails {
    pub name: Option<String>,
    pub location: Option<String>,
    /// Uptime percentage; `None` when missing or not numeric.
    pub uptime: Option<f64>,
    pub expiration_date: Option<String>,
    pub stake_from_self: f64,
    pub stake_from_delegations: f64,
}

impl ValidatorDetails {
    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            name: text_field(fields.get("name")),
            location: text_field(fields.get("location")),
            uptime: fields.get("uptime").and_then(coerce_number),
            expiration_date: text_field(fields.get("expiration_date")),
            stake_from_self: coerce_stake(fields.get("stake_from_self")),
            stake_from_delegations: coerce_stake(fields.get("stake_from_delegations")),
        }
    }

    /// Self stake plus delegated stake.
    pub fn total_stake(&self) -> f64 {
        self.stake_from_self + self.stake_from_delegations
    }
}

/// Strings and numbers are displayable; empty strings count as missing.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The `/config` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteConfig {
    /// Kept raw so that validation is explicit rather than a serde failure.
    #[serde(default)]
    pub refresh_interval_ms: Option<Value>,
}

impl RemoteConfig {
    /// The configured refresh interval, or the default if it is not valid.
    pub fn refresh_interval(&self) -> Duration {
        validate_refresh_interval(self.refresh_interval_ms.as_ref())
            .unwrap_or(DEFAULT_REFRESH_INTERVAL)
    }
}

/// Accept only a positive, finite number of milliseconds.
///
/// Zero, negative, non-numeric (including numeric strings) and missing values
/// are rejected, as is anything too small to produce a non-zero duration.
pub fn validate_refresh_interval(value: Option<&Value>) -> Option<Duration> {
    let ms = value?.as_f64()?;
    if !ms.is_finite() || ms <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(ms / 1000.0).ok().filter(|d| !d.is_zero())
}
