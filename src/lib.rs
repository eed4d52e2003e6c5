//! # validator-dashboard
//!
//! A status dashboard for a set of network validator nodes.
//!
//! The dashboard polls a server for a JSON snapshot of validators, turns each
//! entry into a card (uptime tier, stake breakdown, explorer link) and keeps
//! a view in one of four presentation states: loading, error, sample-data
//! fallback or normal list. The refresh interval is published by the server
//! and fetched once at startup.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │ poller  │───▶│   data   │───▶│  view   │───▶│ ui/html │ │
//! │  │ (cycle) │    │ (cards)  │    │ (state) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource                     │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Data source abstraction ([`SnapshotSource`] trait) with
//!   HTTP and file implementations, and snapshot normalization
//! - **[`data`]**: Formatting, uptime tiers, and snapshot to card conversion
//! - **[`view`]**: The [`ViewPort`] boundary and the in-memory [`DashboardView`],
//!   with an HTML serializer
//! - **[`poller`]**: The poll cycle state machine ([`Poller`]) and its
//!   scheduler ([`PollDriver`])
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a dashboard server in the terminal
//! validator-dashboard --url http://127.0.0.1:5000/
//!
//! # Render once to HTML and exit
//! validator-dashboard --url http://127.0.0.1:5000/ --once > validators.html
//!
//! # Keep an HTML file up to date
//! validator-dashboard --file validators.json --headless --output validators.html
//! ```
//!
//! ### As a library
//!
//! ```
//! use validator_dashboard::{DashboardView, FileSource, Poller, RenderOptions};
//!
//! # tokio_test::block_on(async {
//! let source = FileSource::new("validators.json");
//! let mut view = DashboardView::new();
//! let mut poller = Poller::new(RenderOptions::default());
//!
//! // The file does not exist, so the sample list is shown
//! let outcome = poller.poll_once(&source, &mut view).await;
//! println!("{:?}: {} cards", outcome, view.cards().len());
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod poller;
pub mod source;
pub mod ui;
pub mod view;

// Re-export main types for convenience
pub use app::App;
pub use config::{Overrides, Settings};
pub use data::{
    render_snapshot, sample_cards, CardBody, CardMetrics, CardSummary, RenderOptions,
    RenderOutcome, UptimeTier, ValidatorCard,
};
pub use error::FetchError;
pub use poller::{CycleOutcome, CycleToken, DriverEvent, PollDriver, PollState, Poller};
pub use source::{
    FileSource, HttpSource, RemoteConfig, SnapshotSource, ValidatorDetails, ValidatorEntry,
    ValidatorSnapshot,
};
pub use view::{Banner, BannerKind, DashboardView, ListContents, ViewPort};
