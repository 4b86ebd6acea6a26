//! Event loop feeding a [`Session`].
//!
//! Two futures run side by side on one task. The router drains incoming
//! events as soon as they arrive and cancels the in-flight walk when an
//! event will start a newer one; the processor hands events to the session
//! strictly one at a time. The walker's yield points are where the router
//! gets to run.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info};

use tokenscope_core::{Cancellable, CancellationToken, HostDocument, TokenscopeConfig};

use crate::protocol::OutboundMessage;
use crate::session::{Session, SessionEvent};

/// Shared slot holding the cancellation token of the current walk.
#[derive(Debug, Clone, Default)]
pub struct AnalysisGate {
    current: Arc<Mutex<CancellationToken>>,
}

impl AnalysisGate {
    /// Token for a new walk; replaces the previous one.
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = token.clone();
        token
    }

    /// Cancel the walk in flight, if any.
    pub fn supersede(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }
}

/// Both ends the embedding keeps: events in, UI messages out.
pub struct SessionChannels {
    pub events: mpsc::UnboundedSender<SessionEvent>,
    pub outbox: mpsc::UnboundedReceiver<OutboundMessage>,
}

pub struct SessionDriver<H: HostDocument> {
    session: Session<H>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl<H: HostDocument> SessionDriver<H> {
    pub fn new(host: H, config: &TokenscopeConfig) -> (Self, SessionChannels) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbox_tx, outbox_rx) = mpsc::unbounded_channel();
        let driver = Self {
            session: Session::new(host, config, outbox_tx),
            events: event_rx,
        };
        let channels = SessionChannels {
            events: event_tx,
            outbox: outbox_rx,
        };
        (driver, channels)
    }

    /// Run until every event sender is dropped and the queue is drained.
    /// Returns the session for inspection.
    pub async fn run(self) -> Session<H> {
        let Self {
            mut session,
            mut events,
        } = self;
        let gate = session.gate();
        let (queue_tx, mut queue_rx) = mpsc::unbounded_channel::<SessionEvent>();

        let router = async move {
            while let Some(event) = events.recv().await {
                if event.triggers_analysis() {
                    gate.supersede();
                }
                if queue_tx.send(event).is_err() {
                    break;
                }
            }
            debug!("event source closed");
        };

        let processor = async {
            session.start().await;
            let mut handled = 0usize;
            while let Some(event) = queue_rx.recv().await {
                session.handle_event(event).await;
                handled += 1;
            }
            info!(handled, "session finished");
        };

        tokio::join!(router, processor);
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supersede_cancels_only_the_current_walk() {
        let gate = AnalysisGate::default();
        let first = gate.begin();
        gate.supersede();
        assert!(first.is_cancelled());

        let second = gate.begin();
        assert!(!second.is_cancelled());
        gate.supersede();
        assert!(second.is_cancelled());
    }

    #[test]
    fn clones_share_the_slot() {
        let gate = AnalysisGate::default();
        let token = gate.begin();
        gate.clone().supersede();
        assert!(token.is_cancelled());
    }
}
