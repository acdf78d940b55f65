use std::time::Instant;

use chrono::{DateTime, Utc};
use log::info;

use crate::models::{DwellEvent, Visit};

/// An in-progress visit. Elapsed time is measured against the monotonic
/// anchor; the wall-clock entry time only labels the visit.
#[derive(Debug)]
struct OpenVisit {
    visit: Visit,
    anchor: Instant,
}

/// Measures time spent on the current page and produces exactly one dwell
/// event per visit. The first exit signal wins; anything after it in the
/// same visit is a no-op.
#[derive(Debug, Default)]
pub struct DwellObserver {
    open: Option<OpenVisit>,
}

impl DwellObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing a new visit, closing the previous one if it is still
    /// open. Returns the dwell event for the closed visit, if any.
    pub fn begin_visit(
        &mut self,
        path: &str,
        page_name: &str,
        now: DateTime<Utc>,
        anchor: Instant,
    ) -> Option<DwellEvent> {
        let closed = self.close_open(now, anchor);
        self.open = Some(OpenVisit {
            visit: Visit::begin(path, page_name, now),
            anchor,
        });
        closed
    }

    /// Handles an exit signal (page hidden, unload, shutdown). Idempotent:
    /// only the first signal per visit produces an event.
    pub fn on_exit(&mut self, now: DateTime<Utc>, at: Instant) -> Option<DwellEvent> {
        self.close_open(now, at)
    }

    fn close_open(&mut self, now: DateTime<Utc>, at: Instant) -> Option<DwellEvent> {
        let open = self.open.take()?;
        let duration_ms = at
            .saturating_duration_since(open.anchor)
            .as_millis()
            .min(u128::from(u64::MAX)) as u64;

        info!(
            "visit {} on {} ended after {duration_ms}ms",
            open.visit.id, open.visit.path
        );

        Some(DwellEvent {
            path: open.visit.path,
            duration_ms,
            timestamp: now,
        })
    }
}
