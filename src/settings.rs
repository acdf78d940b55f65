use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

use log::warn;

/// The identity provider's publishable key. The host shell hands it to the
/// sign-in/sign-up widgets; this crate only enforces that it exists.
pub const IDENTITY_KEY_ENV: &str = "SITEPULSE_IDENTITY_PUBLISHABLE_KEY";

/// Optional override for where the event store and settings file live.
pub const DATA_DIR_ENV: &str = "SITEPULSE_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "sitepulse-data";
const DEFAULT_SCROLL_THRESHOLDS: [u8; 4] = [25, 50, 75, 100];

/// Startup configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub publishable_key: String,
    pub data_dir: PathBuf,
}

impl Settings {
    /// Refuses to produce a configuration without the identity key.
    pub fn from_env() -> Result<Self> {
        let publishable_key = env::var(IDENTITY_KEY_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .with_context(|| {
                format!("missing identity provider publishable key ({IDENTITY_KEY_ENV})")
            })?;

        let data_dir = env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            publishable_key,
            data_dir,
        })
    }
}

/// Tunables for the tracking observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSettings {
    /// Scroll depth percentages that emit an engagement event, one each per
    /// visit. Stored unsorted in the file; normalized on load.
    pub scroll_thresholds: Vec<u8>,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            scroll_thresholds: DEFAULT_SCROLL_THRESHOLDS.to_vec(),
        }
    }
}

impl TrackingSettings {
    /// Clamps thresholds to 1..=100, deduplicates, and sorts ascending.
    /// An empty result falls back to the defaults.
    pub fn normalized(mut self) -> Self {
        self.scroll_thresholds.retain(|t| (1..=100).contains(t));
        self.scroll_thresholds.sort_unstable();
        self.scroll_thresholds.dedup();
        if self.scroll_thresholds.is_empty() {
            self.scroll_thresholds = DEFAULT_SCROLL_THRESHOLDS.to_vec();
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct UserSettings {
    tracking: TrackingSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            match serde_json::from_str::<UserSettings>(&contents) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(
                        "Settings file {} is unreadable ({err}); using defaults",
                        path.display()
                    );
                    UserSettings::default()
                }
            }
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn tracking(&self) -> TrackingSettings {
        self.data.read().unwrap().tracking.clone().normalized()
    }

    pub fn update_tracking(&self, settings: TrackingSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.tracking = settings.normalized();
        self.persist(&guard)?;
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
