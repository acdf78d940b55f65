use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::db::Database;
use crate::models::{DwellEvent, EventKind, NavigationEvent, OutboundEvent, ScrollEvent};

/// Where normalized events end up. The shipped implementation writes to the
/// local event store; hosts with a remote collector implement this instead.
#[async_trait]
pub trait EventTransport: Send + Sync + 'static {
    async fn deliver(&self, event: OutboundEvent) -> Result<()>;
}

/// Persists events into the SQLite-backed store.
#[derive(Clone)]
pub struct StoreTransport {
    db: Database,
}

impl StoreTransport {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventTransport for StoreTransport {
    async fn deliver(&self, event: OutboundEvent) -> Result<()> {
        match event.kind {
            EventKind::PageView => {
                let Some(page_name) = event.page_name else {
                    bail!("page view event for {} is missing its label", event.path);
                };
                self.db
                    .insert_page_view(&NavigationEvent {
                        page_name,
                        path: event.path,
                        timestamp: event.timestamp,
                    })
                    .await
            }
            EventKind::ScrollDepth => {
                let Some(depth_percent) = event.depth_percent else {
                    bail!("scroll event for {} is missing its depth", event.path);
                };
                self.db
                    .insert_scroll_event(&ScrollEvent {
                        path: event.path,
                        depth_percent,
                        timestamp: event.timestamp,
                    })
                    .await
            }
            EventKind::Dwell => {
                let Some(duration_ms) = event.duration_ms else {
                    bail!("dwell event for {} is missing its duration", event.path);
                };
                self.db
                    .insert_dwell_event(&DwellEvent {
                        path: event.path,
                        duration_ms,
                        timestamp: event.timestamp,
                    })
                    .await
            }
        }
    }
}
