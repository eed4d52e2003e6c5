//! Data shaping for validator snapshots.
//!
//! This module turns normalized snapshot entries into display-ready card
//! view-models. Nothing here touches a view.
//!
//! ## Submodules
//!
//! - [`format`]: Stake and uptime formatting, numeric coercion
//! - [`tier`]: Uptime tier classification ([`UptimeTier`])
//! - [`cards`]: Snapshot to card conversion ([`render_snapshot`], [`ValidatorCard`])
//! - [`sample`]: The embedded sample list used when live data is unavailable
//!
//! ## Data Flow
//!
//! ```text
//! ValidatorSnapshot (normalized JSON)
//!        │
//!        ▼
//! render_snapshot()
//!        │
//!        ├──▶ RenderOutcome::Cards(Vec<ValidatorCard>)
//!        │
//!        └──▶ RenderOutcome::NoContent (empty snapshot)
//! ```

pub mod cards;
pub mod format;
pub mod sample;
pub mod tier;

pub use cards::{
    render_snapshot, CardBody, CardField, CardMetrics, CardSummary, RenderOptions, RenderOutcome,
    ValidatorCard,
};
pub use sample::sample_cards;
pub use tier::UptimeTier;
