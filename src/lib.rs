mod db;
mod models;
mod reporting;
mod routes;
mod settings;
mod sink;
mod tracking;
mod utils;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

pub use db::{Database, StoredDwellEvent, StoredPageView, StoredScrollEvent};
pub use models::{
    DwellEvent, EventKind, NavigationEvent, OutboundEvent, ScrollEvent, TrackingEvent, Visit,
};
pub use reporting::{
    dashboard_summary, DashboardSummary, DepthCount, PageViewCount, PathDwell, ScrollFunnel,
};
pub use routes::{access_for_path, page_name_for_path, Access};
pub use settings::{Settings, SettingsStore, TrackingSettings, DATA_DIR_ENV, IDENTITY_KEY_ENV};
pub use sink::{EventSink, EventTransport, SinkController, StoreTransport};
pub use tracking::{DwellObserver, NavigationObserver, ScrollObserver, ScrollSample, Tracker};

const STORE_FILE: &str = "sitepulse.sqlite3";
const SETTINGS_FILE: &str = "settings.json";

/// Initialize logging (reads RUST_LOG env var).
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

/// Everything the host shell needs: resolved configuration, the tracker fed
/// by its event loop, and the store behind the dashboard queries.
pub struct AppCore {
    settings: Settings,
    settings_store: SettingsStore,
    db: Database,
    sink: SinkController,
    pub tracker: Tracker,
}

impl std::fmt::Debug for AppCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCore").finish_non_exhaustive()
    }
}

impl AppCore {
    /// Builds the core from the environment. Refuses to start without the
    /// identity provider key. Must be called from within a tokio runtime
    /// (the sink forwarder is spawned here).
    pub fn init() -> Result<Self> {
        let settings = Settings::from_env()?;

        std::fs::create_dir_all(&settings.data_dir).with_context(|| {
            format!("failed to create data directory {}", settings.data_dir.display())
        })?;

        let db = Database::new(settings.data_dir.join(STORE_FILE))?;
        let settings_store = SettingsStore::new(settings.data_dir.join(SETTINGS_FILE))?;

        let mut sink = SinkController::new();
        let event_sink = sink.start(StoreTransport::new(db.clone()))?;
        let tracker = Tracker::new(event_sink, &settings_store.tracking());

        info!("sitepulse core ready (data dir {})", settings.data_dir.display());

        Ok(Self {
            settings,
            settings_store,
            db,
            sink,
            tracker,
        })
    }

    /// The identity provider key the host hands to its sign-in widgets.
    pub fn publishable_key(&self) -> &str {
        &self.settings.publishable_key
    }

    pub fn settings_store(&self) -> &SettingsStore {
        &self.settings_store
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The payload behind the `/analytics` dashboard. The host's guard layer
    /// is responsible for checking [`access_for_path`] first.
    pub async fn dashboard(&self, since: Option<DateTime<Utc>>) -> Result<DashboardSummary> {
        dashboard_summary(&self.db, since).await
    }

    /// Flushes the final dwell event and stops the sink forwarder, draining
    /// queued events into the store.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.tracker.handle_shutdown();
        self.sink.stop().await
    }
}
