use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time};
use tracing::trace;

/// Repeating advance timer for one carousel instance.
///
/// The handle is present iff the tick task is running; that presence is the
/// only liveness state. [`Autoplay::start`] is idempotent, but manual
/// navigation handlers are expected to call stop-then-start around the
/// transition so the clock always restarts at a full interval after user
/// interaction.
pub struct Autoplay {
    interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Autoplay {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            handle: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Begin delivering `tick` into `ticks` every interval, starting one full
    /// interval from now. A second start while running is ignored.
    pub fn start<T>(&mut self, ticks: mpsc::UnboundedSender<T>, tick: T)
    where
        T: Clone + Send + 'static,
    {
        if self.handle.is_some() {
            return;
        }
        let interval = self.interval;
        self.handle = Some(tokio::spawn(async move {
            loop {
                time::sleep(interval).await;
                if ticks.send(tick.clone()).is_err() {
                    trace!("autoplay receiver dropped, timer exiting");
                    break;
                }
            }
        }));
    }

    /// Cancel the tick task if one is running. Redundant calls are no-ops.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "tests/autoplay_tests.rs"]
mod tests;
