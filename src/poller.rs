//! Poll cycle state machine and scheduling.
//!
//! A poll cycle goes `Idle → Loading → (Success | Failure) → Idle`:
//!
//! ```text
//!            begin_cycle()                    complete_cycle()
//!   Idle ───────────────────▶ Loading ───────────────────────────▶ Idle
//!           set_loading(true)    │        Ok(non-empty)  show_list(cards)
//!           clear_error()        │        Ok(empty)      show_error(no data)
//!                                │        Err, list empty show_error + sample
//!                                │        Err, list live  show_error only
//!                                └──────▶ set_loading(false)
//! ```
//!
//! [`Poller`] owns that state and applies results to a [`ViewPort`].
//! [`PollDriver`] adds the schedule: one cycle immediately, the remote config
//! fetched once in parallel, then a cycle every refresh interval. Fetches run
//! as futures polled by the driver's own task, so a slow response never
//! blocks the view and the view is only ever touched from one place.
//!
//! Overlapping cycles are sequenced with [`CycleToken`]s: only the result of
//! the most recently started cycle is applied. A slower, older response that
//! arrives afterwards is dropped as [`CycleOutcome::Superseded`].

use std::future::{pending, Future};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_REFRESH_INTERVAL;
use crate::data::{render_snapshot, sample_cards, RenderOptions, RenderOutcome};
use crate::error::FetchError;
use crate::source::{SnapshotSource, ValidatorSnapshot};
use crate::view::{Banner, ListContents, ViewPort};

/// Shown when the server answered with no validators.
pub const NO_DATA_MESSAGE: &str = "No validator data available.";

/// Shown when the snapshot could not be fetched or parsed.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch validator data. Please try again.";

/// Shown under the error while the sample list is on screen.
pub const SAMPLE_NOTICE_MESSAGE: &str =
    "Showing sample data. The actual data could not be loaded.";

/// Identifies one poll cycle. Later cycles compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleToken(u64);

impl CycleToken {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Where the poller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Loading { cycle: CycleToken },
}

impl PollState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PollState::Loading { .. })
    }
}

/// What a completed cycle did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Live cards replaced the list.
    Rendered { validators: usize },
    /// The fetch succeeded but the snapshot was empty.
    NoData,
    /// The fetch failed and the sample list was shown.
    FailedWithSample,
    /// The fetch failed; existing content was left in place.
    FailedKeptContent,
    /// A newer cycle started before this one finished; nothing was applied.
    Superseded,
}

/// The poll cycle state machine.
#[derive(Debug)]
pub struct Poller {
    options: RenderOptions,
    state: PollState,
    last_started: u64,
}

impl Poller {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            state: PollState::Idle,
            last_started: 0,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Enter the loading state for a new cycle.
    pub fn begin_cycle<V: ViewPort + ?Sized>(&mut self, view: &mut V) -> CycleToken {
        self.last_started += 1;
        let token = CycleToken(self.last_started);
        self.state = PollState::Loading { cycle: token };

        view.set_loading(true);
        view.clear_error();

        debug!(cycle = token.0, "poll cycle started");
        token
    }

    /// Apply the result of the cycle identified by `token`.
    ///
    /// Never fails: every error becomes a banner. Results for anything but
    /// the most recently started cycle are discarded without touching the
    /// view.
    pub fn complete_cycle<V: ViewPort + ?Sized>(
        &mut self,
        view: &mut V,
        token: CycleToken,
        result: Result<ValidatorSnapshot, FetchError>,
    ) -> CycleOutcome {
        if self.state != (PollState::Loading { cycle: token }) {
            debug!(cycle = token.0, latest = self.last_started, "discarding superseded result");
            return CycleOutcome::Superseded;
        }

        let outcome = match result {
            Ok(snapshot) => self.apply_snapshot(view, &snapshot),
            Err(err) => self.apply_failure(view, &err),
        };

        self.state = PollState::Idle;
        view.set_loading(false);

        debug!(cycle = token.0, ?outcome, "poll cycle completed");
        outcome
    }

    /// Run one complete cycle against `source`.
    pub async fn poll_once<V: ViewPort + ?Sized>(
        &mut self,
        source: &dyn SnapshotSource,
        view: &mut V,
    ) -> CycleOutcome {
        let token = self.begin_cycle(view);
        let result = source.fetch_snapshot().await;
        self.complete_cycle(view, token, result)
    }

    fn apply_snapshot<V: ViewPort + ?Sized>(
        &self,
        view: &mut V,
        snapshot: &ValidatorSnapshot,
    ) -> CycleOutcome {
        match render_snapshot(snapshot, &self.options) {
            RenderOutcome::NoContent => {
                // The list is left as it was; only the panel reports it
                view.show_error(Banner::error(NO_DATA_MESSAGE));
                CycleOutcome::NoData
            }
            RenderOutcome::Cards(cards) => {
                let validators = cards.len();
                view.show_list(cards);
                CycleOutcome::Rendered { validators }
            }
        }
    }

    fn apply_failure<V: ViewPort + ?Sized>(&self, view: &mut V, err: &FetchError) -> CycleOutcome {
        warn!(error = %err, "failed to fetch validator data");
        view.show_error(Banner::error(FETCH_FAILED_MESSAGE));

        match view.list_contents() {
            ListContents::Empty => {
                view.show_list(sample_cards(&self.options));
                view.push_banner(Banner::notice(SAMPLE_NOTICE_MESSAGE));
                CycleOutcome::FailedWithSample
            }
            ListContents::Sample => {
                view.push_banner(Banner::notice(SAMPLE_NOTICE_MESSAGE));
                CycleOutcome::FailedKeptContent
            }
            ListContents::Live => CycleOutcome::FailedKeptContent,
        }
    }
}

/// Fetch the remote config once and pick the refresh interval.
///
/// Failures are logged and replaced by [`DEFAULT_REFRESH_INTERVAL`]; they
/// never reach the view.
pub async fn load_refresh_interval(source: &dyn SnapshotSource) -> Duration {
    match source.fetch_config().await {
        Ok(config) => config.refresh_interval(),
        Err(err) => {
            warn!(error = %err, "config fetch failed, using default refresh interval");
            DEFAULT_REFRESH_INTERVAL
        }
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type InFlight = BoxFuture<(CycleToken, Result<ValidatorSnapshot, FetchError>)>;

/// Something the driver did in one [`PollDriver::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// A scheduled tick started a cycle.
    CycleStarted(CycleToken),
    /// A fetch finished and its result was handed to the poller.
    CycleCompleted(CycleToken, CycleOutcome),
    /// The refresh interval is known and the schedule is running.
    Scheduled(Duration),
}

/// Runs poll cycles on a fixed schedule.
///
/// The driver is not a task of its own: the owner calls [`step`] in a loop
/// (typically inside `tokio::select!` alongside input handling), and each
/// step applies at most one change to the view. `step` is cancel-safe.
///
/// [`step`]: PollDriver::step
pub struct PollDriver {
    source: Arc<dyn SnapshotSource>,
    poller: Poller,
    in_flight: FuturesUnordered<InFlight>,
    pending_config: Option<BoxFuture<Duration>>,
    schedule: Option<Interval>,
}

impl PollDriver {
    /// Create a driver and start the remote config fetch.
    pub fn new(source: Arc<dyn SnapshotSource>, poller: Poller) -> Self {
        let config_source = Arc::clone(&source);
        let pending_config: BoxFuture<Duration> =
            Box::pin(async move { load_refresh_interval(config_source.as_ref()).await });

        Self {
            source,
            poller,
            in_flight: FuturesUnordered::new(),
            pending_config: Some(pending_config),
            schedule: None,
        }
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// The refresh interval, once the remote config has been resolved.
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.schedule.as_ref().map(Interval::period)
    }

    /// Number of fetches that have not completed yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Start a cycle now, outside the schedule.
    ///
    /// Used for the initial poll and for manual refreshes.
    pub fn trigger<V: ViewPort + ?Sized>(&mut self, view: &mut V) -> CycleToken {
        let token = self.poller.begin_cycle(view);
        let source = Arc::clone(&self.source);
        self.in_flight.push(Box::pin(async move {
            let result = source.fetch_snapshot().await;
            (token, result)
        }));
        token
    }

    /// Wait for the next thing to happen and apply it to `view`.
    pub async fn step<V: ViewPort + ?Sized>(&mut self, view: &mut V) -> DriverEvent {
        enum Next {
            Completed(CycleToken, Result<ValidatorSnapshot, FetchError>),
            Configured(Duration),
            Tick,
        }

        let next = {
            let in_flight = &mut self.in_flight;
            let pending_config = &mut self.pending_config;
            let schedule = &mut self.schedule;

            tokio::select! {
                biased;

                Some((token, result)) = in_flight.next() => Next::Completed(token, result),

                period = async {
                    match pending_config.as_mut() {
                        Some(fut) => fut.await,
                        None => pending().await,
                    }
                } => Next::Configured(period),

                _ = async {
                    match schedule.as_mut() {
                        Some(interval) => {
                            interval.tick().await;
                        }
                        None => pending::<()>().await,
                    }
                } => Next::Tick,
            }
        };

        match next {
            Next::Completed(token, result) => {
                let outcome = self.poller.complete_cycle(view, token, result);
                DriverEvent::CycleCompleted(token, outcome)
            }
            Next::Configured(period) => {
                self.pending_config = None;
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.schedule = Some(interval);
                info!(interval_ms = period.as_millis() as u64, "refresh schedule started");
                DriverEvent::Scheduled(period)
            }
            Next::Tick => DriverEvent::CycleStarted(self.trigger(view)),
        }
    }
}

impl std::fmt::Debug for PollDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollDriver")
            .field("source", &self.source)
            .field("poller", &self.poller)
            .field("in_flight", &self.in_flight.len())
            .field("refresh_interval", &self.refresh_interval())
            .finish()
    }
}
