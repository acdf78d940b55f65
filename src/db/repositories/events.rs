use anyhow::Result;
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, to_i64, to_u64, to_u8_percent},
    models::{StoredDwellEvent, StoredPageView, StoredScrollEvent},
};
use crate::models::{DwellEvent, NavigationEvent, ScrollEvent};

fn row_to_page_view(row: &Row) -> Result<StoredPageView> {
    let timestamp: String = row.get("timestamp")?;
    Ok(StoredPageView {
        id: row.get("id")?,
        page_name: row.get("page_name")?,
        path: row.get("path")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
    })
}

fn row_to_scroll_event(row: &Row) -> Result<StoredScrollEvent> {
    let timestamp: String = row.get("timestamp")?;
    let depth: i64 = row.get("depth_percent")?;
    Ok(StoredScrollEvent {
        id: row.get("id")?,
        path: row.get("path")?,
        depth_percent: to_u8_percent(depth, "depth_percent")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
    })
}

fn row_to_dwell_event(row: &Row) -> Result<StoredDwellEvent> {
    let timestamp: String = row.get("timestamp")?;
    let duration: i64 = row.get("duration_ms")?;
    Ok(StoredDwellEvent {
        id: row.get("id")?,
        path: row.get("path")?,
        duration_ms: to_u64(duration, "duration_ms")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
    })
}

impl Database {
    pub async fn insert_page_view(&self, event: &NavigationEvent) -> Result<()> {
        let record = event.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO page_views (page_name, path, timestamp)
                 VALUES (?1, ?2, ?3)",
                params![
                    record.page_name,
                    record.path,
                    record.timestamp.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn insert_scroll_event(&self, event: &ScrollEvent) -> Result<()> {
        let record = event.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO scroll_events (path, depth_percent, timestamp)
                 VALUES (?1, ?2, ?3)",
                params![
                    record.path,
                    i64::from(record.depth_percent),
                    record.timestamp.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn insert_dwell_event(&self, event: &DwellEvent) -> Result<()> {
        let record = event.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO dwell_events (path, duration_ms, timestamp)
                 VALUES (?1, ?2, ?3)",
                params![
                    record.path,
                    to_i64(record.duration_ms)?,
                    record.timestamp.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn list_page_views(&self, path: Option<String>) -> Result<Vec<StoredPageView>> {
        self.execute(move |conn| {
            let mut views = Vec::new();
            match path {
                Some(path) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, page_name, path, timestamp FROM page_views
                         WHERE path = ?1 ORDER BY id",
                    )?;
                    let mut rows = stmt.query(params![path])?;
                    while let Some(row) = rows.next()? {
                        views.push(row_to_page_view(row)?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, page_name, path, timestamp FROM page_views ORDER BY id",
                    )?;
                    let mut rows = stmt.query([])?;
                    while let Some(row) = rows.next()? {
                        views.push(row_to_page_view(row)?);
                    }
                }
            }
            Ok(views)
        })
        .await
    }

    pub async fn list_scroll_events(&self, path: String) -> Result<Vec<StoredScrollEvent>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, path, depth_percent, timestamp FROM scroll_events
                 WHERE path = ?1 ORDER BY id",
            )?;
            let mut rows = stmt.query(params![path])?;
            let mut events = Vec::new();
            while let Some(row) = rows.next()? {
                events.push(row_to_scroll_event(row)?);
            }
            Ok(events)
        })
        .await
    }

    pub async fn list_dwell_events(&self, path: String) -> Result<Vec<StoredDwellEvent>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, path, duration_ms, timestamp FROM dwell_events
                 WHERE path = ?1 ORDER BY id",
            )?;
            let mut rows = stmt.query(params![path])?;
            let mut events = Vec::new();
            while let Some(row) = rows.next()? {
                events.push(row_to_dwell_event(row)?);
            }
            Ok(events)
        })
        .await
    }
}
