//! Cancellable polling task.
//!
//! The poller re-arms a one-shot timer after each reconciliation cycle and
//! exits as soon as nothing is pending, so it never outlives the work it
//! tracks. Stopping is immediate and unconditional: the shutdown signal is
//! sent and the task is aborted, cancelling any fetch in flight.
//!
//! ```text
//! loop:
//!   keep polling? --no--> exit
//!      |yes
//!   sleep(interval) --shutdown--> exit
//!      |
//!   reconcile
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default delay between reconciliation cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Something the poller can reconcile.
#[async_trait]
pub trait PollTarget: Send + Sync + 'static {
    /// Whether another cycle is needed. Returning false ends the task.
    ///
    /// Implementations that re-arm polling from outside must make this
    /// decision under the same lock as the re-arm check.
    async fn keep_polling(&self) -> bool;

    /// Performs one reconciliation fetch.
    async fn reconcile(&self);
}

/// Handle to a running poll task. Dropping it stops the task.
pub struct PollHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Spawns the poll loop on the current tokio runtime.
    pub fn spawn(target: Arc<dyn PollTarget>, interval: Duration) -> Self {
        let (shutdown, receiver) = watch::channel(false);
        let task = tokio::spawn(run(target, interval, receiver));
        Self { shutdown, task }
    }

    /// True until the loop has exited.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the loop, cancelling any pending timer or fetch.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(target: Arc<dyn PollTarget>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    loop {
        if !target.keep_polling().await {
            debug!("Nothing pending, polling stopped");
            return;
        }

        tokio::select! {
            _ = shutdown.changed() => {
                debug!("Polling cancelled");
                return;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        target.reconcile().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Target that stays pending for a fixed number of cycles.
    struct CountdownTarget {
        remaining: AtomicUsize,
        reconciles: AtomicUsize,
    }

    impl CountdownTarget {
        fn new(cycles: usize) -> Arc<Self> {
            Arc::new(Self {
                remaining: AtomicUsize::new(cycles),
                reconciles: AtomicUsize::new(0),
            })
        }

        fn reconciles(&self) -> usize {
            self.reconciles.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PollTarget for CountdownTarget {
        async fn keep_polling(&self) -> bool {
            self.remaining.load(Ordering::SeqCst) > 0
        }

        async fn reconcile(&self) {
            self.reconciles.fetch_add(1, Ordering::SeqCst);
            self.remaining.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reconciles_once_per_interval_until_settled() {
        let target = CountdownTarget::new(2);
        let handle = PollHandle::spawn(target.clone(), Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(target.reconciles(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(target.reconciles(), 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(target.reconciles(), 2);
        assert!(!handle.is_active());

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(target.reconciles(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exits_immediately_when_nothing_pending() {
        let target = CountdownTarget::new(0);
        let handle = PollHandle::spawn(target.clone(), Duration::from_secs(30));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(!handle.is_active());
        assert_eq!(target.reconciles(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_timer() {
        let target = CountdownTarget::new(10);
        let handle = PollHandle::spawn(target.clone(), Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(10)).await;
        handle.stop();

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(target.reconciles(), 0);
        assert!(!handle.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let target = CountdownTarget::new(10);
        let handle = PollHandle::spawn(target.clone(), Duration::from_secs(30));
        drop(handle);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(target.reconciles(), 0);
    }
}
