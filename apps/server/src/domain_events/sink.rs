use tokio::sync::mpsc;

use fitfolio_core::events::{DomainEvent, DomainEventSink};

/// Sink that forwards domain events into the worker channel.
///
/// `emit` never blocks; if the worker is gone the event is dropped.
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::UnboundedSender<DomainEvent>) -> Self {
        ChannelEventSink { tx }
    }
}

impl DomainEventSink for ChannelEventSink {
    fn emit(&self, event: DomainEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("domain event dropped: search index worker has shut down");
        }
    }
}
