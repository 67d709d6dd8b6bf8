//! Network policy monitoring.

use convdata_common::NetworkAccessBehavior;
use tokio::sync::watch;
use tracing::info;

/// Reports the current network access behavior and its changes.
pub trait NetworkPolicyMonitor: Send + Sync {
    /// Current behavior.
    fn current(&self) -> NetworkAccessBehavior;

    /// Subscribe to behavior changes.
    fn subscribe(&self) -> watch::Receiver<NetworkAccessBehavior>;
}

/// Settable monitor backed by a watch channel.
///
/// The host application feeds platform connectivity events into `set`.
pub struct NetworkMonitor {
    sender: watch::Sender<NetworkAccessBehavior>,
}

impl NetworkMonitor {
    /// Create a monitor reporting `initial`.
    pub fn new(initial: NetworkAccessBehavior) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Publish a new behavior. Subscribers are only woken on an actual change.
    pub fn set(&self, behavior: NetworkAccessBehavior) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == behavior {
                false
            } else {
                *current = behavior;
                true
            }
        });

        if changed {
            info!(behavior = %behavior, "Network access behavior changed");
        }
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new(NetworkAccessBehavior::Normal)
    }
}

impl NetworkPolicyMonitor for NetworkMonitor {
    fn current(&self) -> NetworkAccessBehavior {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<NetworkAccessBehavior> {
        self.sender.subscribe()
    }
}
