use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{to_u64, to_u8_percent},
};
use crate::reporting::{DepthCount, PageViewCount, PathDwell};

fn row_to_page_count(row: &Row) -> Result<PageViewCount> {
    let views: i64 = row.get("views")?;
    Ok(PageViewCount {
        path: row.get("path")?,
        page_name: row.get("page_name")?,
        views: to_u64(views, "views")?,
    })
}

fn row_to_path_dwell(row: &Row) -> Result<PathDwell> {
    let avg_ms: i64 = row.get("avg_ms")?;
    let samples: i64 = row.get("samples")?;
    Ok(PathDwell {
        path: row.get("path")?,
        avg_duration_ms: to_u64(avg_ms, "avg_ms")?,
        samples: to_u64(samples, "samples")?,
    })
}

fn row_to_depth_count(row: &Row) -> Result<DepthCount> {
    let depth: i64 = row.get("depth_percent")?;
    let events: i64 = row.get("events")?;
    Ok(DepthCount {
        depth_percent: to_u8_percent(depth, "depth_percent")?,
        events: to_u64(events, "events")?,
    })
}

impl Database {
    pub async fn page_view_counts(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PageViewCount>> {
        self.execute(move |conn| {
            let mut counts = Vec::new();
            match since {
                Some(since) => {
                    let mut stmt = conn.prepare(
                        "SELECT path, MAX(page_name) AS page_name, COUNT(*) AS views
                         FROM page_views
                         WHERE timestamp >= ?1
                         GROUP BY path ORDER BY views DESC, path",
                    )?;
                    let mut rows = stmt.query(params![since.to_rfc3339()])?;
                    while let Some(row) = rows.next()? {
                        counts.push(row_to_page_count(row)?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT path, MAX(page_name) AS page_name, COUNT(*) AS views
                         FROM page_views
                         GROUP BY path ORDER BY views DESC, path",
                    )?;
                    let mut rows = stmt.query([])?;
                    while let Some(row) = rows.next()? {
                        counts.push(row_to_page_count(row)?);
                    }
                }
            }
            Ok(counts)
        })
        .await
    }

    pub async fn avg_dwell_by_path(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<PathDwell>> {
        self.execute(move |conn| {
            let mut dwell = Vec::new();
            match since {
                Some(since) => {
                    let mut stmt = conn.prepare(
                        "SELECT path, CAST(AVG(duration_ms) AS INTEGER) AS avg_ms,
                                COUNT(*) AS samples
                         FROM dwell_events
                         WHERE timestamp >= ?1
                         GROUP BY path ORDER BY avg_ms DESC, path",
                    )?;
                    let mut rows = stmt.query(params![since.to_rfc3339()])?;
                    while let Some(row) = rows.next()? {
                        dwell.push(row_to_path_dwell(row)?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT path, CAST(AVG(duration_ms) AS INTEGER) AS avg_ms,
                                COUNT(*) AS samples
                         FROM dwell_events
                         GROUP BY path ORDER BY avg_ms DESC, path",
                    )?;
                    let mut rows = stmt.query([])?;
                    while let Some(row) = rows.next()? {
                        dwell.push(row_to_path_dwell(row)?);
                    }
                }
            }
            Ok(dwell)
        })
        .await
    }

    pub async fn scroll_depth_counts(&self, path: String) -> Result<Vec<DepthCount>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT depth_percent, COUNT(*) AS events FROM scroll_events
                 WHERE path = ?1
                 GROUP BY depth_percent
                 ORDER BY depth_percent",
            )?;
            let mut rows = stmt.query(params![path])?;
            let mut counts = Vec::new();
            while let Some(row) = rows.next()? {
                counts.push(row_to_depth_count(row)?);
            }
            Ok(counts)
        })
        .await
    }
}
