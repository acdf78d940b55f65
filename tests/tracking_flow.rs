//! End-to-end flows: tracker → sink → store → dashboard queries.

use std::time::Duration;

use sitepulse::{
    dashboard_summary, AppCore, Database, EventKind, ScrollSample, SinkController,
    StoreTransport, Tracker, TrackingSettings, DATA_DIR_ENV, IDENTITY_KEY_ENV,
};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> Database {
    Database::new(dir.path().join("events.sqlite3")).unwrap()
}

fn pipeline(db: &Database) -> (Tracker, SinkController) {
    let mut controller = SinkController::new();
    let sink = controller.start(StoreTransport::new(db.clone())).unwrap();
    let tracker = Tracker::new(sink, &TrackingSettings::default());
    (tracker, controller)
}

#[tokio::test]
async fn full_visit_flow_lands_in_the_store() {
    let dir = TempDir::new().unwrap();
    let db = open_store(&dir);
    let (mut tracker, mut controller) = pipeline(&db);

    tracker.handle_navigation("/");
    tracker.handle_navigation("/partner");
    tracker.handle_scroll(ScrollSample {
        scroll_top: 200.0,
        viewport_px: 100.0,
        content_px: 1000.0,
    });
    tracker.handle_scroll(ScrollSample {
        scroll_top: 500.0,
        viewport_px: 100.0,
        content_px: 1000.0,
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    tracker.handle_navigation("/contact");
    tracker.handle_shutdown();
    controller.stop().await.unwrap();

    let views = db.list_page_views(None).await.unwrap();
    let paths: Vec<&str> = views.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(paths, vec!["/", "/partner", "/contact"]);
    assert_eq!(views[0].page_name, "Home");
    assert_eq!(views[1].page_name, "Partner");

    let scrolls = db.list_scroll_events("/partner".into()).await.unwrap();
    let depths: Vec<u8> = scrolls.iter().map(|s| s.depth_percent).collect();
    assert_eq!(depths, vec![25, 50]);

    // One dwell per closed visit: "/" and "/partner" and the final
    // "/contact" flushed by shutdown.
    let partner_dwell = db.list_dwell_events("/partner".into()).await.unwrap();
    assert_eq!(partner_dwell.len(), 1);
    assert!(partner_dwell[0].duration_ms >= 40);

    let contact_dwell = db.list_dwell_events("/contact".into()).await.unwrap();
    assert_eq!(contact_dwell.len(), 1);
}

#[tokio::test]
async fn dashboard_summary_aggregates_the_store() {
    let dir = TempDir::new().unwrap();
    let db = open_store(&dir);
    let (mut tracker, mut controller) = pipeline(&db);

    tracker.handle_navigation("/");
    tracker.handle_navigation("/partner");
    tracker.handle_navigation("/");
    tracker.handle_scroll(ScrollSample {
        scroll_top: 900.0,
        viewport_px: 100.0,
        content_px: 1000.0,
    });
    tracker.handle_shutdown();
    controller.stop().await.unwrap();

    let summary = dashboard_summary(&db, None).await.unwrap();
    assert_eq!(summary.total_page_views, 3);
    assert_eq!(summary.tracked_paths, 2);

    let home = summary
        .top_pages
        .iter()
        .find(|p| p.path == "/")
        .unwrap();
    assert_eq!(home.views, 2);
    assert_eq!(home.page_name, "Home");

    // Three visits closed, all with dwell samples.
    let dwell_paths: Vec<&str> = summary
        .dwell_by_path
        .iter()
        .map(|d| d.path.as_str())
        .collect();
    assert!(dwell_paths.contains(&"/"));
    assert!(dwell_paths.contains(&"/partner"));

    let funnel = summary
        .scroll_funnels
        .iter()
        .find(|f| f.path == "/")
        .unwrap();
    assert_eq!(funnel.depths.len(), 1);
    assert_eq!(funnel.depths[0].depth_percent, 100);
    assert_eq!(funnel.depths[0].events, 1);
}

#[tokio::test]
async fn skipped_threshold_scenario_round_trips() {
    let dir = TempDir::new().unwrap();
    let db = open_store(&dir);
    let (mut tracker, mut controller) = pipeline(&db);

    tracker.handle_navigation("/partner");
    for depth in [30.0, 60.0, 100.0] {
        tracker.handle_scroll(ScrollSample {
            scroll_top: depth * 10.0 - 100.0,
            viewport_px: 100.0,
            content_px: 1000.0,
        });
    }
    controller.stop().await.unwrap();

    let scrolls = db.list_scroll_events("/partner".into()).await.unwrap();
    let depths: Vec<u8> = scrolls.iter().map(|s| s.depth_percent).collect();
    assert_eq!(depths, vec![25, 50, 100]);
}

#[tokio::test]
async fn app_core_requires_the_identity_key() {
    let dir = TempDir::new().unwrap();
    std::env::set_var(DATA_DIR_ENV, dir.path().join("core"));

    // Without the key the core refuses to initialize.
    std::env::remove_var(IDENTITY_KEY_ENV);
    let err = AppCore::init().unwrap_err();
    assert!(err.to_string().contains(IDENTITY_KEY_ENV));

    // With it, the core comes up and shuts down cleanly.
    std::env::set_var(IDENTITY_KEY_ENV, "pk_test_0000000000");
    let mut core = AppCore::init().unwrap();
    assert_eq!(core.publishable_key(), "pk_test_0000000000");

    core.tracker.handle_navigation("/");
    core.shutdown().await.unwrap();

    let views = core.database().list_page_views(None).await.unwrap();
    assert_eq!(views.len(), 1);
}
