use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stay on a route: begins when navigation lands on the path, ends when
/// navigation leaves it (or the page is hidden/closed).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: String,
    pub path: String,
    pub page_name: String,
    pub entered_at: DateTime<Utc>,
}

impl Visit {
    pub fn begin(path: &str, page_name: &str, entered_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            path: path.to_string(),
            page_name: page_name.to_string(),
            entered_at,
        }
    }
}
