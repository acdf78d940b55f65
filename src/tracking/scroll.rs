use chrono::{DateTime, Utc};

use crate::models::ScrollEvent;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = false;

use crate::log_info;

/// One viewport scroll reading, in pixels, as reported by the host.
#[derive(Debug, Clone, Copy)]
pub struct ScrollSample {
    pub scroll_top: f64,
    pub viewport_px: f64,
    pub content_px: f64,
}

impl ScrollSample {
    /// Share of total content height revealed, 0..=100. A page shorter than
    /// the viewport counts as fully revealed.
    pub fn depth_percent(&self) -> u8 {
        if self.content_px <= 0.0 || self.content_px <= self.viewport_px {
            return 100;
        }
        let revealed = (self.scroll_top.max(0.0) + self.viewport_px) / self.content_px;
        (revealed * 100.0).clamp(0.0, 100.0) as u8
    }
}

/// Emits one engagement event per configured depth threshold per visit.
///
/// A sample fires only the highest threshold it newly reaches and consumes
/// every threshold at or below its depth, so thresholds jumped over in one
/// reading never fire later in the visit.
#[derive(Debug)]
pub struct ScrollObserver {
    thresholds: Vec<u8>,
    consumed: Vec<bool>,
    path: Option<String>,
    last_depth: Option<u8>,
}

impl ScrollObserver {
    /// `thresholds` must be sorted ascending and unique; the settings layer
    /// normalizes them before they get here.
    pub fn new(thresholds: Vec<u8>) -> Self {
        let consumed = vec![false; thresholds.len()];
        Self {
            thresholds,
            consumed,
            path: None,
            last_depth: None,
        }
    }

    /// Resets visit-scoped state for a new path.
    pub fn begin_visit(&mut self, path: &str) {
        self.path = Some(path.to_string());
        self.consumed.iter_mut().for_each(|c| *c = false);
        self.last_depth = None;
    }

    pub fn on_scroll(&mut self, sample: ScrollSample, now: DateTime<Utc>) -> Option<ScrollEvent> {
        let path = self.path.clone()?;
        let depth = sample.depth_percent();

        // Rapid scrolling repeats the same integer depth; skip those early.
        if self.last_depth == Some(depth) {
            return None;
        }
        self.last_depth = Some(depth);

        let mut fired: Option<usize> = None;
        for (idx, threshold) in self.thresholds.iter().enumerate() {
            if *threshold > depth {
                break;
            }
            if !self.consumed[idx] {
                self.consumed[idx] = true;
                fired = Some(idx);
            }
        }

        let idx = fired?;
        let depth_percent = self.thresholds[idx];
        log_info!("scroll depth {depth_percent}% reached on {path}");
        Some(ScrollEvent {
            path,
            depth_percent,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(depth: f64) -> ScrollSample {
        // 1000px of content behind a 100px viewport: scroll_top maps straight
        // onto revealed share.
        ScrollSample {
            scroll_top: depth * 10.0 - 100.0,
            viewport_px: 100.0,
            content_px: 1000.0,
        }
    }

    fn observer() -> ScrollObserver {
        let mut observer = ScrollObserver::new(vec![25, 50, 75, 100]);
        observer.begin_visit("/partner");
        observer
    }

    #[test]
    fn depth_is_revealed_share_of_content() {
        assert_eq!(sample_at(25.0).depth_percent(), 25);
        assert_eq!(sample_at(100.0).depth_percent(), 100);
        assert_eq!(
            ScrollSample {
                scroll_top: 0.0,
                viewport_px: 100.0,
                content_px: 1000.0
            }
            .depth_percent(),
            10
        );
    }

    #[test]
    fn short_page_is_fully_revealed() {
        let sample = ScrollSample {
            scroll_top: 0.0,
            viewport_px: 800.0,
            content_px: 500.0,
        };
        assert_eq!(sample.depth_percent(), 100);
    }

    #[test]
    fn skipped_thresholds_do_not_fire() {
        let mut observer = observer();
        let now = Utc::now();

        let first = observer.on_scroll(sample_at(30.0), now).unwrap();
        assert_eq!(first.depth_percent, 25);

        let second = observer.on_scroll(sample_at(60.0), now).unwrap();
        assert_eq!(second.depth_percent, 50);

        let third = observer.on_scroll(sample_at(100.0), now).unwrap();
        assert_eq!(third.depth_percent, 100);

        // 75 was jumped over and stays consumed.
        observer.last_depth = None;
        assert!(observer.on_scroll(sample_at(80.0), now).is_none());
    }

    #[test]
    fn each_threshold_fires_at_most_once_per_visit() {
        let mut observer = observer();
        let now = Utc::now();

        assert!(observer.on_scroll(sample_at(50.0), now).is_some());
        assert!(observer.on_scroll(sample_at(40.0), now).is_none());
        assert!(observer.on_scroll(sample_at(50.0), now).is_none());
    }

    #[test]
    fn repeated_depth_readings_are_dropped_early() {
        let mut observer = observer();
        let now = Utc::now();

        assert!(observer.on_scroll(sample_at(10.0), now).is_none());
        assert!(observer.on_scroll(sample_at(10.0), now).is_none());
        assert_eq!(observer.last_depth, Some(10));
    }

    #[test]
    fn new_visit_resets_consumed_thresholds() {
        let mut observer = observer();
        let now = Utc::now();

        assert!(observer.on_scroll(sample_at(100.0), now).is_some());
        observer.begin_visit("/contact");

        let again = observer.on_scroll(sample_at(30.0), now).unwrap();
        assert_eq!(again.depth_percent, 25);
        assert_eq!(again.path, "/contact");
    }

    #[test]
    fn samples_before_any_visit_emit_nothing() {
        let mut observer = ScrollObserver::new(vec![25, 50, 75, 100]);
        assert!(observer.on_scroll(sample_at(100.0), Utc::now()).is_none());
    }
}
