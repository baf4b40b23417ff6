use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use super::lock;

const TICK: Duration = Duration::from_secs(1);

/// One-second countdown with a single live instance.
///
/// Remaining seconds are published on a `watch` channel. Starting a new run
/// aborts the previous one; a run epoch keeps a superseded task from
/// publishing a late tick.
pub struct CountdownTimer {
    remaining: Arc<watch::Sender<u32>>,
    run: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CountdownTimer {
    #[must_use]
    pub fn new(initial_secs: u32) -> Self {
        let (remaining, _) = watch::channel(initial_secs);
        Self {
            remaining: Arc::new(remaining),
            run: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.subscribe()
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        lock(&self.task)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Count down from `budget_secs`, calling `on_expired` once at zero.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<F>(&self, budget_secs: u32, on_expired: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut task = lock(&self.task);
        if let Some(previous) = task.take() {
            previous.abort();
        }
        let run = self.run.fetch_add(1, Ordering::AcqRel) + 1;
        self.remaining.send_replace(budget_secs);

        let remaining = Arc::clone(&self.remaining);
        let current = Arc::clone(&self.run);
        *task = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
            let mut left = budget_secs;
            while left > 0 {
                ticker.tick().await;
                let mut superseded = false;
                remaining.send_if_modified(|value| {
                    if current.load(Ordering::Acquire) != run {
                        superseded = true;
                        return false;
                    }
                    *value = value.saturating_sub(1);
                    left = *value;
                    true
                });
                if superseded {
                    return;
                }
            }
            tracing::debug!(run, "countdown reached zero");
            on_expired();
        }));
    }

    /// Cancel the running countdown, if any. Remaining seconds are kept.
    pub fn stop(&self) {
        let mut task = lock(&self.task);
        self.run.fetch_add(1, Ordering::AcqRel);
        if let Some(task) = task.take() {
            task.abort();
        }
    }

    /// Stop and republish the full budget.
    pub fn reset(&self, budget_secs: u32) {
        self.stop();
        self.remaining.send_replace(budget_secs);
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::time::sleep;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let timer = CountdownTimer::new(10);
        let (_, on_expired) = counter();
        timer.start(10, on_expired);
        assert_eq!(timer.remaining(), 10);

        sleep(Duration::from_millis(1_500)).await;
        assert_eq!(timer.remaining(), 9);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(timer.remaining(), 6);
        assert!(timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn expires_exactly_once() {
        let timer = CountdownTimer::new(3);
        let (fired, on_expired) = counter();
        timer.start(3, on_expired);

        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(timer.remaining(), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_supersedes_previous_run() {
        let timer = CountdownTimer::new(5);
        let (first, first_expired) = counter();
        timer.start(5, first_expired);
        sleep(Duration::from_millis(2_500)).await;
        assert_eq!(timer.remaining(), 3);

        let (second, second_expired) = counter();
        timer.start(5, second_expired);
        assert_eq!(timer.remaining(), 5);

        sleep(Duration::from_millis(5_500)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_freezes_remaining() {
        let timer = CountdownTimer::new(5);
        timer.stop();

        let (fired, on_expired) = counter();
        timer.start(5, on_expired);
        sleep(Duration::from_millis(1_500)).await;
        timer.stop();
        timer.stop();

        sleep(Duration::from_secs(10)).await;
        assert_eq!(timer.remaining(), 4);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!timer.is_running());

        timer.reset(5);
        assert_eq!(timer.remaining(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_each_tick() {
        let timer = CountdownTimer::new(2);
        let (_, on_expired) = counter();
        timer.start(2, on_expired);
        let mut rx = timer.subscribe();
        assert_eq!(*rx.borrow_and_update(), 2);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_budget_expires_immediately() {
        let timer = CountdownTimer::new(0);
        let (fired, on_expired) = counter();
        timer.start(0, on_expired);
        sleep(Duration::from_millis(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
