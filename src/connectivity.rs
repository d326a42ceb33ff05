//! Network reachability snapshot shared between the path observer and senders.
//!
//! One [`ConnectivityUpdater`] writes; any number of cloned
//! [`ConnectivityGate`]s read the latest value. The flag is only advisory:
//! a request that already passed the gate is not affected by later flips.

use std::pin::pin;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Status reported by the platform's network path observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStatus {
    /// The path is usable.
    Satisfied,
    /// No usable path exists.
    Unsatisfied,
    /// A path may become usable once a connection is established.
    RequiresConnection,
}

impl PathStatus {
    /// Only [`PathStatus::Satisfied`] counts as connected.
    pub fn is_usable(self) -> bool {
        matches!(self, Self::Satisfied)
    }
}

/// Read side of the connectivity snapshot.
#[derive(Clone, Debug)]
pub struct ConnectivityGate {
    rx: watch::Receiver<bool>,
}

impl ConnectivityGate {
    /// Creates a gate together with its single writer.
    pub fn channel(initially_available: bool) -> (ConnectivityUpdater, Self) {
        let (tx, rx) = watch::channel(initially_available);
        (ConnectivityUpdater { tx }, Self { rx })
    }

    /// Creates a gate that never changes.
    pub fn fixed(available: bool) -> Self {
        Self::channel(available).1
    }

    /// Spawns a task that feeds `updates` into a new gate.
    ///
    /// The task ends when the stream does; the gate then keeps the last
    /// reported value. Must be called from within a Tokio runtime.
    pub fn observe<S>(initially_available: bool, updates: S) -> (Self, JoinHandle<()>)
    where
        S: Stream<Item = PathStatus> + Send + 'static,
    {
        let (updater, gate) = Self::channel(initially_available);
        let handle = tokio::spawn(updater.run(updates));
        (gate, handle)
    }

    /// Whether the network was usable at the last update.
    pub fn is_available(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Write side of the connectivity snapshot. Not cloneable.
#[derive(Debug)]
pub struct ConnectivityUpdater {
    tx: watch::Sender<bool>,
}

impl ConnectivityUpdater {
    /// Publishes a new path status.
    pub fn set(&self, status: PathStatus) {
        let usable = status.is_usable();
        let changed = self.tx.send_if_modified(|current| {
            if *current == usable {
                false
            } else {
                *current = usable;
                true
            }
        });
        if changed {
            debug!(?status, available = usable, "connectivity changed");
        }
    }

    /// Applies every status from `updates` until the stream ends.
    pub async fn run<S>(self, updates: S)
    where
        S: Stream<Item = PathStatus>,
    {
        let mut updates = pin!(updates);
        while let Some(status) = updates.next().await {
            self.set(status);
        }
        debug!("path observer stream ended");
    }
}

#[cfg(test)]
mod tests {
    use futures::channel::mpsc;
    use futures::stream;

    use super::{ConnectivityGate, PathStatus};

    #[test]
    fn only_satisfied_paths_are_usable() {
        assert!(PathStatus::Satisfied.is_usable());
        assert!(!PathStatus::Unsatisfied.is_usable());
        assert!(!PathStatus::RequiresConnection.is_usable());
    }

    #[test]
    fn updater_flips_every_clone_of_the_gate() {
        let (updater, gate) = ConnectivityGate::channel(true);
        let reader = gate.clone();
        assert!(reader.is_available());

        updater.set(PathStatus::Unsatisfied);
        assert!(!gate.is_available());
        assert!(!reader.is_available());

        updater.set(PathStatus::Satisfied);
        assert!(reader.is_available());
    }

    #[test]
    fn fixed_gate_keeps_its_value() {
        assert!(ConnectivityGate::fixed(true).is_available());
        assert!(!ConnectivityGate::fixed(false).is_available());
    }

    #[tokio::test]
    async fn observer_applies_stream_in_order() {
        let updates = stream::iter([
            PathStatus::Unsatisfied,
            PathStatus::Satisfied,
            PathStatus::RequiresConnection,
        ]);
        let (gate, handle) = ConnectivityGate::observe(true, updates);
        handle.await.expect("observer task completes");
        assert!(!gate.is_available());
    }

    #[tokio::test]
    async fn observer_follows_live_channel() {
        let (tx, rx) = mpsc::unbounded();
        let (gate, handle) = ConnectivityGate::observe(false, rx);

        tx.unbounded_send(PathStatus::Satisfied).expect("observer alive");
        drop(tx);
        handle.await.expect("observer task completes");
        assert!(gate.is_available());
    }
}
