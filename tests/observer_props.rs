//! Property suites for the observer invariants.

use std::time::{Duration, Instant};

use chrono::Utc;
use proptest::prelude::*;
use sitepulse::{DwellObserver, NavigationObserver, ScrollObserver, ScrollSample};

/// Maps an integer depth percentage onto an exact viewport reading.
fn sample_for_depth(depth: u8) -> ScrollSample {
    ScrollSample {
        scroll_top: f64::from(depth) * 100.0,
        viewport_px: 0.0,
        content_px: 10_000.0,
    }
}

proptest! {
    #[test]
    fn one_page_view_per_committed_change(paths in prop::collection::vec("/[a-z]{1,8}", 1..40)) {
        let mut observer = NavigationObserver::new();
        let now = Utc::now();
        let mut last: Option<String> = None;

        for path in &paths {
            let fired = observer.on_route_change(path, now);
            if last.as_deref() == Some(path.as_str()) {
                prop_assert!(fired.is_none(), "re-report of {path} fired");
            } else {
                let event = fired.expect("committed change must fire");
                prop_assert_eq!(&event.path, path);
                last = Some(path.clone());
            }
        }
    }

    #[test]
    fn monotonic_scroll_fires_each_threshold_at_most_once_ascending(
        mut depths in prop::collection::vec(0u8..=100, 1..60),
    ) {
        depths.sort_unstable();

        let mut observer = ScrollObserver::new(vec![25, 50, 75, 100]);
        observer.begin_visit("/partner");

        let now = Utc::now();
        let mut fired = Vec::new();
        for depth in &depths {
            if let Some(event) = observer.on_scroll(sample_for_depth(*depth), now) {
                prop_assert!(event.depth_percent <= *depth);
                fired.push(event.depth_percent);
            }
        }

        let mut deduped = fired.clone();
        deduped.dedup();
        prop_assert_eq!(&fired, &deduped, "duplicate threshold fired");
        prop_assert!(fired.windows(2).all(|w| w[0] < w[1]), "not ascending: {:?}", fired);
        prop_assert!(fired.len() <= 4);
    }

    #[test]
    fn any_scroll_sequence_never_fires_a_threshold_twice(
        depths in prop::collection::vec(0u8..=100, 1..60),
    ) {
        let mut observer = ScrollObserver::new(vec![25, 50, 75, 100]);
        observer.begin_visit("/");

        let now = Utc::now();
        let mut fired = Vec::new();
        for depth in &depths {
            if let Some(event) = observer.on_scroll(sample_for_depth(*depth), now) {
                fired.push(event.depth_percent);
            }
        }

        // The consumed set only grows, so fired thresholds are strictly
        // ascending even when the input wanders back down.
        prop_assert!(fired.windows(2).all(|w| w[0] < w[1]), "refired: {:?}", fired);
    }

    #[test]
    fn exactly_one_dwell_event_per_visit(
        offsets_ms in prop::collection::vec(0u64..10_000, 1..10),
        visit_ms in 0u64..10_000,
    ) {
        let mut observer = DwellObserver::new();
        let anchor = Instant::now();
        let now = Utc::now();

        observer.begin_visit("/contact", "Contact", now, anchor);

        let first_exit = anchor + Duration::from_millis(visit_ms);
        let event = observer.on_exit(now, first_exit).expect("first exit must fire");
        prop_assert_eq!(event.duration_ms, visit_ms);
        prop_assert_eq!(event.path, "/contact");

        for offset in offsets_ms {
            let later = anchor + Duration::from_millis(offset);
            prop_assert!(observer.on_exit(now, later).is_none(), "second exit fired");
        }
    }
}
