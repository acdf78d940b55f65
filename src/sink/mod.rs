mod store;

pub use store::{EventTransport, StoreTransport};

use anyhow::{bail, Context, Result};
use log::info;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::models::{OutboundEvent, TrackingEvent};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_warn};

/// The single ingestion point for all observers.
///
/// `record` normalizes the event and enqueues it for the forwarder task. It
/// never blocks and never fails: analytics must not be able to break the
/// host application, so a dead forwarder only costs the event.
#[derive(Clone)]
pub struct EventSink {
    tx: UnboundedSender<OutboundEvent>,
}

impl EventSink {
    pub fn channel() -> (EventSink, UnboundedReceiver<OutboundEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSink { tx }, rx)
    }

    pub fn record(&self, event: TrackingEvent) {
        let outbound = OutboundEvent::from(event);
        if self.tx.send(outbound).is_err() {
            log_warn!("event sink forwarder is gone; dropping event");
        }
    }
}

/// Owns the forwarder task that drains the sink queue into a transport.
pub struct SinkController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl SinkController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    /// Spawns the forwarder and returns the sink observers record into.
    pub fn start<T: EventTransport>(&mut self, transport: T) -> Result<EventSink> {
        if self.handle.is_some() {
            bail!("sink forwarder already active");
        }

        let (sink, rx) = EventSink::channel();
        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(forwarder_loop(rx, transport, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(sink)
    }

    /// Cancels the forwarder; it drains whatever is still queued through the
    /// transport before exiting.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("sink forwarder task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for SinkController {
    fn default() -> Self {
        Self::new()
    }
}

async fn forwarder_loop<T: EventTransport>(
    mut rx: UnboundedReceiver<OutboundEvent>,
    transport: T,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event) => deliver(&transport, event).await,
                    None => break,
                }
            }
            _ = cancel_token.cancelled() => {
                rx.close();
                while let Ok(event) = rx.try_recv() {
                    deliver(&transport, event).await;
                }
                info!("sink forwarder shutting down");
                break;
            }
        }
    }
}

/// Transport failures end here. Observers never see them.
async fn deliver<T: EventTransport>(transport: &T, event: OutboundEvent) {
    let kind = event.kind;
    let path = event.path.clone();
    if let Err(err) = transport.deliver(event).await {
        log_error!("failed to deliver {} event for {path}: {err:#}", kind.as_str());
    }
}
