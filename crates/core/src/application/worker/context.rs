// Execution Context - advisory cancellation shared by every job in a batch

use tokio::sync::watch;

/// Cancellation signal handed to every job
///
/// Cancellation is advisory: jobs observe it during their network calls, the
/// worker pool never aborts an in-flight job because of it.
#[derive(Clone)]
pub struct ExecutionContext {
    rx: watch::Receiver<bool>,
}

impl ExecutionContext {
    /// A context that is never cancelled
    pub fn background() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for cancellation
    ///
    /// Never resolves when the handle is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Cancellation handle
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation to every job holding the context
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Create a cancellation channel
pub fn cancellation_channel() -> (CancelHandle, ExecutionContext) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, ExecutionContext { rx })
}
