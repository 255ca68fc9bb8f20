//! The measure-then-maybe-report loop.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::constants::{DEFAULT_LOOP_INTERVAL, DEFAULT_POLL_INTERVAL};
use crate::models::Location;
use crate::provider::MeasurementProvider;
use crate::reporter::MeasurementReporter;
use crate::severity::{transition, Severity};
use crate::Result;

/// Timing of the poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// How long to sleep between checks for a stop request
    pub loop_interval: Duration,
    /// Minimum time between two full passes over the locations
    pub poll_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            loop_interval: DEFAULT_LOOP_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Most recently *reported* index per location display name.
#[derive(Debug, Default, Clone)]
pub struct LastKnownIndex {
    by_location: HashMap<String, f64>,
}

impl LastKnownIndex {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported index, or `None` if the location was never reported
    pub fn get(&self, display_name: &str) -> Option<f64> {
        self.by_location.get(display_name).copied()
    }

    /// Stores the index that was just reported
    pub fn record(&mut self, display_name: &str, index: f64) {
        self.by_location.insert(display_name.to_string(), index);
    }

    /// Whether no location has been reported yet
    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }
}

/// What happened to a single location during a cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Band changed and the alert went out
    Reported { index: f64, severity: Severity },
    /// Same band as the last report, nothing published
    Unchanged { index: f64, severity: Severity },
}

/// Per-outcome counts for one pass over the locations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub reported: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Drives provider, classifier and reporter on a timer and owns the reported state
pub struct Poller {
    provider: Arc<dyn MeasurementProvider>,
    reporter: Arc<dyn MeasurementReporter>,
    settings: PollSettings,
    last_known: LastKnownIndex,
    last_poll: Option<Instant>,
}

impl Poller {
    /// Creates a poller with no reported state
    pub fn new(
        provider: Arc<dyn MeasurementProvider>,
        reporter: Arc<dyn MeasurementReporter>,
        settings: PollSettings,
    ) -> Self {
        Self {
            provider,
            reporter,
            settings,
            last_known: LastKnownIndex::new(),
            last_poll: None,
        }
    }

    /// Reported indices so far
    pub fn last_known(&self) -> &LastKnownIndex {
        &self.last_known
    }

    /// Measures one location and reports it if its band moved since the last report.
    ///
    /// The stored index only changes after a successful report.
    pub async fn measure_and_report(&mut self, location: &Location) -> Result<Outcome> {
        let index = self.provider.measure(location).await?;
        let severity = Severity::classify(index);
        info!(
            location = %location.display_name,
            index,
            severity = %severity,
            "Measured UV index"
        );

        let previous = self.last_known.get(&location.display_name);
        if !transition(previous, index) {
            return Ok(Outcome::Unchanged { index, severity });
        }

        self.reporter.report(location, index).await?;
        self.last_known.record(&location.display_name, index);
        info!(
            location = %location.display_name,
            index,
            severity = %severity,
            "Reported severity change"
        );
        Ok(Outcome::Reported { index, severity })
    }

    /// One pass over every location, in order. A failing location never stops the pass.
    pub async fn poll_locations(&mut self, locations: &[Location]) -> CycleSummary {
        let mut summary = CycleSummary::default();
        for location in locations {
            match self.measure_and_report(location).await {
                Ok(Outcome::Reported { .. }) => summary.reported += 1,
                Ok(Outcome::Unchanged { .. }) => summary.unchanged += 1,
                Err(e) if e.is_recoverable() => {
                    warn!(
                        location = %location.display_name,
                        error = %e,
                        "Skipping location until next poll"
                    );
                    summary.failed += 1;
                }
                Err(e) => {
                    error!(
                        location = %location.display_name,
                        error = %e,
                        "Unexpected error, skipping location until next poll"
                    );
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    /// Whether a full poll should run at `now`. The first check always polls.
    pub fn poll_due(&self, now: Instant) -> bool {
        match self.last_poll {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.settings.poll_interval,
        }
    }

    /// Runs until `stop` fires (or its sender is dropped).
    ///
    /// The stop request is checked once per tick, so shutdown can lag by one
    /// `loop_interval` plus whatever cycle is in flight.
    pub async fn run(&mut self, locations: &[Location], mut stop: oneshot::Receiver<()>) {
        info!(
            locations = locations.len(),
            loop_interval = ?self.settings.loop_interval,
            poll_interval = ?self.settings.poll_interval,
            "Starting poll loop"
        );

        loop {
            match stop.try_recv() {
                Ok(()) | Err(TryRecvError::Closed) => {
                    info!("Received exit signal");
                    break;
                }
                Err(TryRecvError::Empty) => {}
            }

            if self.poll_due(Instant::now()) {
                info!("Measuring UV index");
                let summary = self.poll_locations(locations).await;
                info!(
                    reported = summary.reported,
                    unchanged = summary.unchanged,
                    failed = summary.failed,
                    "Poll cycle finished"
                );
                self.last_poll = Some(Instant::now());
            }

            tokio::time::sleep(self.settings.loop_interval).await;
        }

        info!("Poll loop stopped");
    }
}
