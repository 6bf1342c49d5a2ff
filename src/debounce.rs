//! Trailing-edge debouncing for high-frequency triggers.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

/// Collapses a burst of `trigger()` calls into a single delayed run of the
/// wrapped action.
///
/// Every trigger re-arms the timer; the action runs once `wait` has elapsed
/// with no further triggers. Only the last trigger in any `wait`-length
/// window wins, so a superseded trigger's run may never happen. `trigger()`
/// is fire-and-forget and never blocks.
///
/// The action itself reads whatever state it needs at fire time, not at
/// trigger time, so it always sees the latest values.
pub struct DebounceGate {
    tx: mpsc::UnboundedSender<()>,
}

impl DebounceGate {
    /// Spawn the gate's timer task. Must be called within a Tokio runtime.
    ///
    /// The task exits once the gate is dropped and any pending window has
    /// resolved.
    pub fn new<F, Fut>(wait: Duration, action: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        tokio::spawn(async move {
            // Outer recv blocks until a burst starts; the inner loop then
            // keeps re-arming until a full quiet window passes.
            while rx.recv().await.is_some() {
                loop {
                    tokio::select! {
                        () = time::sleep(wait) => {
                            action().await;
                            break;
                        }
                        more = rx.recv() => {
                            if more.is_none() {
                                return;
                            }
                        }
                    }
                }
            }
        });

        Self { tx }
    }

    /// Schedule (or re-schedule) the action `wait` from now.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}
