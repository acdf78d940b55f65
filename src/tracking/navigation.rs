use chrono::{DateTime, Utc};

use crate::models::NavigationEvent;
use crate::routes::page_name_for_path;

/// Watches committed route changes and produces one page-view event per
/// distinct navigation, including the initial load. Re-reports of the path
/// the observer is already on (host re-renders) produce nothing.
#[derive(Debug, Default)]
pub struct NavigationObserver {
    last_path: Option<String>,
}

impl NavigationObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_route_change(
        &mut self,
        path: &str,
        now: DateTime<Utc>,
    ) -> Option<NavigationEvent> {
        if self.last_path.as_deref() == Some(path) {
            return None;
        }

        self.last_path = Some(path.to_string());
        Some(NavigationEvent {
            page_name: page_name_for_path(path),
            path: path.to_string(),
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_distinct_navigation_in_order() {
        let mut observer = NavigationObserver::new();
        let now = Utc::now();

        let first = observer.on_route_change("/", now).unwrap();
        assert_eq!(first.page_name, "Home");
        assert_eq!(first.path, "/");

        let second = observer.on_route_change("/partner", now).unwrap();
        assert_eq!(second.page_name, "Partner");
        assert_eq!(second.path, "/partner");
    }

    #[test]
    fn re_render_of_same_path_is_a_no_op() {
        let mut observer = NavigationObserver::new();
        let now = Utc::now();

        assert!(observer.on_route_change("/contact", now).is_some());
        assert!(observer.on_route_change("/contact", now).is_none());
        assert!(observer.on_route_change("/contact", now).is_none());
    }

    #[test]
    fn returning_to_a_previous_path_fires_again() {
        let mut observer = NavigationObserver::new();
        let now = Utc::now();

        assert!(observer.on_route_change("/", now).is_some());
        assert!(observer.on_route_change("/partner", now).is_some());
        assert!(observer.on_route_change("/", now).is_some());
    }
}
