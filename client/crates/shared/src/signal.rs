//! Signal - Zero-replay event broadcast
//!
//! A [`Signal`] fans one-shot events out to every receiver that is
//! subscribed at the moment of emission. Nothing is retained for late
//! subscribers: emitting with no receiver attached drops the event.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Per-receiver backlog before a slow receiver starts lagging
const DEFAULT_CAPACITY: usize = 16;

/// Zero-replay broadcast signal
pub struct Signal<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone> Signal<T> {
    /// Create a signal with the default receiver backlog
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a signal whose receivers each buffer up to `capacity` events
    ///
    /// ## Panics
    /// If `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current receivers
    ///
    /// Returns how many receivers the event reached. Zero means the event
    /// was dropped.
    pub fn emit(&self, event: T) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Attach a new receiver; it only sees events emitted from now on
    pub fn subscribe(&self) -> SignalReceiver<T> {
        SignalReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of receivers currently attached
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("receivers", &self.tx.receiver_count())
            .finish()
    }
}

/// Receiving half of a [`Signal`]
pub struct SignalReceiver<T> {
    rx: broadcast::Receiver<T>,
}

impl<T: Clone> SignalReceiver<T> {
    /// Wait for the next event
    ///
    /// Returns `None` once every [`Signal`] handle has been dropped.
    /// A receiver that fell behind skips the overwritten events.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next event if one is already queued
    pub fn try_recv(&mut self) -> Option<T> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}
