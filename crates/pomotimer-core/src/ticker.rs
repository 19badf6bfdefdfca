//! Once-per-second tick scheduler.
//!
//! [`Ticker`] is the handle for the single recurring task that drives
//! [`TimerEngine::tick`](crate::TimerEngine::tick). The task only sends
//! [`Tick`] messages; the owner of the engine drains the receiver on its own
//! thread, so the engine never needs a lock.
//!
//! At most one task exists per `Ticker`. Every start bumps the generation,
//! and a tick whose generation is stale (sent by a task that has since been
//! cancelled but still sitting in the channel) should be dropped by the
//! receiver via [`Ticker::is_current`].

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// One elapsed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

pub struct Ticker {
    period: Duration,
    tx: mpsc::UnboundedSender<Tick>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl Ticker {
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let ticker = Self {
            period,
            tx,
            task: None,
            generation: 0,
        };
        (ticker, rx)
    }

    pub fn every_second() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        Self::new(Duration::from_secs(1))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Whether `tick` came from the task started last.
    pub fn is_current(&self, tick: &Tick) -> bool {
        self.is_active() && tick.generation == self.generation
    }

    /// Spawn the tick task on `handle`. The first tick fires one period
    /// from now. Returns `false` if a task is already active.
    pub fn start(&mut self, handle: &Handle) -> bool {
        if self.is_active() {
            return false;
        }
        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();

        self.task = Some(handle.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        debug!(generation, "ticker started");
        true
    }

    /// Abort the tick task. Returns `false` if none was active.
    pub fn cancel(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                let was_active = !task.is_finished();
                task.abort();
                debug!(generation = self.generation, "ticker cancelled");
                was_active
            }
            None => false,
        }
    }

    /// Start or cancel so that a task is active exactly when `running`.
    pub fn sync(&mut self, running: bool, handle: &Handle) {
        if running {
            self.start(handle);
        } else {
            self.cancel();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (mut ticker, mut rx) = Ticker::every_second();
        assert!(ticker.start(&Handle::current()));

        let t0 = Instant::now();
        let first = rx.recv().await.unwrap();
        assert_eq!(first.generation, 1);
        let elapsed = Instant::now() - t0;
        assert!(elapsed >= Duration::from_secs(1) && elapsed < Duration::from_millis(1100));

        rx.recv().await.unwrap();
        let elapsed = Instant::now() - t0;
        assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_millis(2100));
        assert!(ticker.is_current(&first));
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent() {
        let (mut ticker, mut rx) = Ticker::every_second();
        let handle = Handle::current();
        assert!(ticker.start(&handle));
        assert!(!ticker.start(&handle));
        assert_eq!(ticker.generation(), 1);

        time::sleep(Duration::from_millis(3500)).await;
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks() {
        let (mut ticker, mut rx) = Ticker::every_second();
        ticker.start(&Handle::current());
        rx.recv().await.unwrap();

        assert!(ticker.cancel());
        assert!(!ticker.cancel());
        assert!(!ticker.is_active());

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_invalidates_old_ticks() {
        let (mut ticker, mut rx) = Ticker::every_second();
        let handle = Handle::current();
        ticker.start(&handle);
        let old = rx.recv().await.unwrap();

        ticker.sync(false, &handle);
        ticker.sync(true, &handle);
        assert_eq!(ticker.generation(), 2);
        assert!(!ticker.is_current(&old));

        let fresh = rx.recv().await.unwrap();
        assert_eq!(fresh.generation, 2);
        assert!(ticker.is_current(&fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_closes_channel() {
        let (mut ticker, mut rx) = Ticker::every_second();
        ticker.start(&Handle::current());
        drop(ticker);
        assert!(rx.recv().await.is_none());
    }
}
