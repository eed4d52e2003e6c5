//! Uptime tier classification.

/// Uptime at or above this percentage is high.
pub const UPTIME_THRESHOLD_HIGH: f64 = 95.0;

/// Uptime at or above this percentage (and below high) is medium.
pub const UPTIME_THRESHOLD_MEDIUM: f64 = 90.0;

/// Display bucket for a validator's uptime.
///
/// Every uptime value maps to exactly one tier. Values outside 0..=100 are
/// not validated, and anything that is not at least
/// [`UPTIME_THRESHOLD_MEDIUM`] (including NaN) falls through to `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UptimeTier {
    Low,
    Medium,
    High,
}

impl UptimeTier {
    /// Classify an uptime percentage.
    pub fn classify(uptime: f64) -> Self {
        if uptime >= UPTIME_THRESHOLD_HIGH {
            UptimeTier::High
        } else if uptime >= UPTIME_THRESHOLD_MEDIUM {
            UptimeTier::Medium
        } else {
            UptimeTier::Low
        }
    }

    /// Classify an optional uptime; a missing value is low.
    pub fn classify_opt(uptime: Option<f64>) -> Self {
        uptime.map_or(UptimeTier::Low, Self::classify)
    }

    /// The CSS class the stylesheet expects for this tier.
    pub fn css_class(&self) -> &'static str {
        match self {
            UptimeTier::High => "uptime-high",
            UptimeTier::Medium => "uptime-medium",
            UptimeTier::Low => "uptime-low",
        }
    }

    /// Short label for terminal display.
    pub fn label(&self) -> &'static str {
        match self {
            UptimeTier::High => "high",
            UptimeTier::Medium => "medium",
            UptimeTier::Low => "low",
        }
    }
}
