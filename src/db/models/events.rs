//! Row forms of the tracked events as they live in the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPageView {
    pub id: i64,
    pub page_name: String,
    pub path: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredScrollEvent {
    pub id: i64,
    pub path: String,
    pub depth_percent: u8,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDwellEvent {
    pub id: i64,
    pub path: String,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}
