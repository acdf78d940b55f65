mod dwell;
mod navigation;
mod scroll;

pub use dwell::DwellObserver;
pub use navigation::NavigationObserver;
pub use scroll::{ScrollObserver, ScrollSample};

use std::time::Instant;

use chrono::Utc;

use crate::models::TrackingEvent;
use crate::settings::TrackingSettings;
use crate::sink::EventSink;

/// Facade over the three observers. The host calls these entry points from
/// its UI event loop; each observer owns its visit-scoped state exclusively
/// and the sink is the only shared collaborator.
pub struct Tracker {
    navigation: NavigationObserver,
    scroll: ScrollObserver,
    dwell: DwellObserver,
    sink: EventSink,
}

impl Tracker {
    pub fn new(sink: EventSink, settings: &TrackingSettings) -> Self {
        Self {
            navigation: NavigationObserver::new(),
            scroll: ScrollObserver::new(settings.scroll_thresholds.clone()),
            dwell: DwellObserver::new(),
            sink,
        }
    }

    /// A committed route change, including the initial load. Closes the
    /// previous visit (emitting its dwell event) and opens the next one.
    pub fn handle_navigation(&mut self, path: &str) {
        let now = Utc::now();
        let at = Instant::now();

        let Some(page_view) = self.navigation.on_route_change(path, now) else {
            return;
        };

        if let Some(dwell) = self.dwell.begin_visit(path, &page_view.page_name, now, at) {
            self.sink.record(TrackingEvent::Dwell(dwell));
        }
        self.scroll.begin_visit(path);
        self.sink.record(TrackingEvent::PageView(page_view));
    }

    /// A viewport scroll reading for the current page.
    pub fn handle_scroll(&mut self, sample: ScrollSample) {
        if let Some(event) = self.scroll.on_scroll(sample, Utc::now()) {
            self.sink.record(TrackingEvent::ScrollDepth(event));
        }
    }

    /// A visibility change. Hidden ends the current visit for dwell
    /// purposes; becoming visible again does not reopen it.
    pub fn handle_visibility(&mut self, hidden: bool) {
        if !hidden {
            return;
        }
        if let Some(event) = self.dwell.on_exit(Utc::now(), Instant::now()) {
            self.sink.record(TrackingEvent::Dwell(event));
        }
    }

    /// Host teardown: flush the final dwell event. Safe to call more than
    /// once.
    pub fn handle_shutdown(&mut self) {
        if let Some(event) = self.dwell.on_exit(Utc::now(), Instant::now()) {
            self.sink.record(TrackingEvent::Dwell(event));
        }
    }
}
