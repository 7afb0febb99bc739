use dashboard::Timer;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

/// Schedules boundaries as tokio sleep tasks. Fired boundaries arrive on the
/// receiver returned by [`TokioTimer::new`].
pub struct TokioTimer {
    origin: Instant,
    tx: UnboundedSender<usize>,
}

/// Aborts the sleep task when dropped.
pub struct TokioTimerHandle(JoinHandle<()>);

impl Drop for TokioTimerHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl TokioTimer {
    /// Deadlines are measured from the moment this is called.
    pub fn new() -> (Self, UnboundedReceiver<usize>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                origin: Instant::now(),
                tx,
            },
            rx,
        )
    }
}

impl Timer for TokioTimer {
    type Handle = TokioTimerHandle;

    fn schedule(&mut self, boundary: usize, deadline: Duration) -> Self::Handle {
        let tx = self.tx.clone();
        let at = self.origin + deadline;
        TokioTimerHandle(tokio::spawn(async move {
            tokio::time::sleep_until(at).await;
            trace!(boundary, "Boundary timer fired");
            // The receiver is gone once the session finished
            let _ = tx.send(boundary);
        }))
    }
}
