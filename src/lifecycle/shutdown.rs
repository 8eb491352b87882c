//! Stop notice fanned out to every listener task.

use tokio::sync::broadcast;

/// Sends the stop notice. Each listener holds one [`StopSignal`].
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

/// One listener's view of the stop notice.
pub struct StopSignal(broadcast::Receiver<()>);

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Register a listener. Must happen before `trigger` for it to be told.
    pub fn signal(&self) -> StopSignal {
        StopSignal(self.tx.subscribe())
    }

    /// Tell every registered listener to stop. Returns how many were told.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }

    /// Listeners holding a signal, i.e. still serving or draining.
    pub fn active_listeners(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    /// Resolves on `trigger`, or when the `Shutdown` is dropped.
    pub async fn stopped(mut self) {
        let _ = self.0.recv().await;
    }
}
