//! Scan events and the cross-context hand-off channel
//!
//! The serving context pushes accepted scans onto an [`EventChannel`]; the
//! controlling context drains it periodically. Neither side ever blocks on
//! the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;
use tracing::debug;

/// Where a scan was submitted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanSource {
    Mobile,
    Other,
}

impl fmt::Display for ScanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanSource::Mobile => write!(f, "mobile"),
            ScanSource::Other => write!(f, "other"),
        }
    }
}

/// One decoded barcode/QR value accepted from a device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEvent {
    /// The decoded value, trimmed of surrounding whitespace
    pub code: String,
    /// Submission origin
    pub source: ScanSource,
    /// When the submission was accepted
    pub received_at: DateTime<Utc>,
}

impl ScanEvent {
    /// Create an event for a scan submitted by the phone
    pub fn mobile(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            source: ScanSource::Mobile,
            received_at: Utc::now(),
        }
    }
}

/// Producer half handed to the server at start time
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ScanEvent>,
}

impl EventSender {
    /// Queue an event for the consumer. Never blocks; a push after the
    /// consumer has gone away is silently dropped.
    pub fn push(&self, event: ScanEvent) {
        if self.tx.send(event).is_err() {
            debug!("Event consumer gone, dropping scan event");
        }
    }
}

/// Consumer half owned by the controlling context
#[derive(Debug)]
pub struct EventChannel {
    rx: mpsc::UnboundedReceiver<ScanEvent>,
}

impl EventChannel {
    /// Create a connected sender/channel pair
    pub fn new() -> (EventSender, EventChannel) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSender { tx }, EventChannel { rx })
    }

    /// Return all currently queued events in FIFO order without blocking
    pub fn drain(&mut self) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_fifo_order() {
        let (tx, mut channel) = EventChannel::new();

        tx.push(ScanEvent::mobile("A"));
        tx.push(ScanEvent::mobile("B"));
        tx.push(ScanEvent::mobile("C"));

        let codes: Vec<String> = channel.drain().into_iter().map(|e| e.code).collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_drain_empty_channel() {
        let (_tx, mut channel) = EventChannel::new();
        assert!(channel.drain().is_empty());
    }

    #[test]
    fn test_drain_consumes_events_once() {
        let (tx, mut channel) = EventChannel::new();
        tx.push(ScanEvent::mobile("X"));

        assert_eq!(channel.drain().len(), 1);
        assert!(channel.drain().is_empty());
    }

    #[test]
    fn test_push_after_consumer_dropped_does_not_panic() {
        let (tx, channel) = EventChannel::new();
        drop(channel);
        tx.push(ScanEvent::mobile("orphan"));
    }

    #[test]
    fn test_cloned_senders_share_one_queue() {
        let (tx, mut channel) = EventChannel::new();
        let tx2 = tx.clone();

        tx.push(ScanEvent::mobile("first"));
        tx2.push(ScanEvent::mobile("second"));

        let codes: Vec<String> = channel.drain().into_iter().map(|e| e.code).collect();
        assert_eq!(codes, vec!["first", "second"]);
    }
}
