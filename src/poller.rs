//! Timed re-invocation of an async tick, user-toggled.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Two-state auto-refresh driver: OFF until started, ON until stopped.
///
/// While ON, the tick callback runs on a fixed period. The callback is
/// awaited to completion before the next period is scheduled, so ticks never
/// overlap and a slow refresh cannot race a later one. `stop` (or dropping
/// the poller) cancels the pending tick deterministically; no callback
/// begins after cancellation.
#[derive(Default)]
pub struct Poller {
    running: Option<Running>,
}

struct Running {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start ticking every `period`. The first tick fires one full period
    /// after this call, never immediately. No-op when already running.
    pub fn start<F, Fut>(&mut self, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        if self.running.is_some() {
            return;
        }

        let (cancel, mut cancelled) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut timer = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    _ = timer.tick() => tick().await,
                    _ = cancelled.changed() => break,
                }
            }
        });

        debug!(period_secs = period.as_secs_f64(), "poller started");
        self.running = Some(Running { cancel, handle });
    }

    /// Cancel the pending tick and release the timer task.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.cancel.send(true);
            running.handle.abort();
            debug!("poller stopped");
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
