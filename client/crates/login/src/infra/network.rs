//! Network Status Implementations
//!
//! [`StaticNetworkStatus`] is a plain flag. [`WatchNetworkStatus`] also
//! publishes connectivity changes to subscribers, for platforms that push
//! online/offline transitions.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::domain::collaborator::{NetworkStatus, NetworkStatusStream};

/// Connectivity flag set by the host
#[derive(Debug)]
pub struct StaticNetworkStatus {
    online: AtomicBool,
}

impl StaticNetworkStatus {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl NetworkStatus for StaticNetworkStatus {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}

/// Connectivity backed by a watch channel
#[derive(Debug)]
pub struct WatchNetworkStatus {
    tx: watch::Sender<bool>,
}

impl WatchNetworkStatus {
    pub fn new(online: bool) -> Self {
        Self {
            tx: watch::Sender::new(online),
        }
    }

    /// Record a connectivity change; subscribers are only woken on transitions
    pub fn set_online(&self, online: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == online {
                return false;
            }
            *current = online;
            true
        });
        if changed {
            tracing::info!(online, "Network status changed");
        }
    }
}

impl NetworkStatus for WatchNetworkStatus {
    fn is_online(&self) -> bool {
        *self.tx.borrow()
    }
}

impl NetworkStatusStream for WatchNetworkStatus {
    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_status() {
        let status = StaticNetworkStatus::online();
        assert!(status.is_online());
        status.set_online(false);
        assert!(!status.is_online());
        assert!(!StaticNetworkStatus::offline().is_online());
    }

    #[tokio::test]
    async fn test_watch_status_notifies_on_transition_only() {
        let status = WatchNetworkStatus::new(true);
        let mut rx = status.subscribe();

        status.set_online(true);
        assert!(!rx.has_changed().unwrap());

        status.set_online(false);
        assert!(rx.has_changed().unwrap());
        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());
        assert!(!status.is_online());
    }

    async fn next_transition(network: &impl NetworkStatusStream) -> bool {
        let mut rx = network.subscribe();
        rx.changed().await.unwrap();
        *rx.borrow_and_update()
    }

    #[tokio::test]
    async fn test_stream_through_trait_sees_later_transitions() {
        let status = WatchNetworkStatus::new(false);
        let next = next_transition(&status);
        tokio::pin!(next);

        tokio::select! {
            _ = &mut next => panic!("no transition yet"),
            _ = tokio::task::yield_now() => {}
        }

        status.set_online(true);
        assert!(next.await);
    }
}
