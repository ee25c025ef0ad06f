//! Coalesces rapid filter changes into a single delivery.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period the admin list views use between keystrokes and a refetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Timer-backed debouncer: every `submit` cancels the pending timer and
/// schedules the new value, so only the last value of a burst is delivered.
/// Dropping the debouncer cancels whatever is still pending.
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Schedule `value` for delivery after the quiet period, replacing any
    /// value already waiting.
    pub fn submit(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver being gone just means nobody wants the fetch anymore
            let _ = tx.send(value);
        }));
    }

    /// Drop the scheduled delivery without sending it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
