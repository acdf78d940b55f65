//! Aggregates behind the analytics dashboard.
//!
//! Everything here is read-only over the event store; the host renders the
//! serialized results. Access control for the dashboard route is the host's
//! guard layer (see [`crate::routes::access_for_path`]).

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageViewCount {
    pub path: String,
    pub page_name: String,
    pub views: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathDwell {
    pub path: String,
    pub avg_duration_ms: u64,
    pub samples: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepthCount {
    pub depth_percent: u8,
    pub events: u64,
}

/// How far down visitors get on one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrollFunnel {
    pub path: String,
    pub depths: Vec<DepthCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_page_views: u64,
    pub tracked_paths: u64,
    pub top_pages: Vec<PageViewCount>,
    pub dwell_by_path: Vec<PathDwell>,
    pub scroll_funnels: Vec<ScrollFunnel>,
}

/// Assembles the dashboard payload, optionally bounded to events at or after
/// `since`. Scroll funnels are computed for every path that recorded views.
pub async fn dashboard_summary(
    db: &Database,
    since: Option<DateTime<Utc>>,
) -> Result<DashboardSummary> {
    let top_pages = db.page_view_counts(since).await?;
    let dwell_by_path = db.avg_dwell_by_path(since).await?;

    let mut scroll_funnels = Vec::with_capacity(top_pages.len());
    for page in &top_pages {
        let depths = db.scroll_depth_counts(page.path.clone()).await?;
        if !depths.is_empty() {
            scroll_funnels.push(ScrollFunnel {
                path: page.path.clone(),
                depths,
            });
        }
    }

    Ok(DashboardSummary {
        total_page_views: top_pages.iter().map(|p| p.views).sum(),
        tracked_paths: top_pages.len() as u64,
        top_pages,
        dwell_by_path,
        scroll_funnels,
    })
}
