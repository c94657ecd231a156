//! Cancellable debounce timer.
//!
//! `schedule(value)` cancels any pending timer and starts a new one. Only a
//! timer that survives `delay` without being replaced publishes its value.
//! Subscribers read the settled value from a `watch` channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// State shared between the debouncer and its timer tasks.
///
/// `generation` only changes while `pending` is locked, so a timer that
/// holds the lock sees a generation that matches the value it would take.
struct Shared<T> {
    generation: AtomicU64,
    pending: Mutex<Option<T>>,
    tx: watch::Sender<T>,
}

impl<T> Shared<T> {
    /// Publish the pending value if `generation` is still current.
    fn settle(&self, generation: u64) -> bool {
        let mut pending = self.pending.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        match pending.take() {
            Some(value) => {
                self.tx.send_replace(value);
                true
            }
            None => false,
        }
    }

    /// Invalidate outstanding timers and take the pending value.
    fn supersede(&self) -> Option<T> {
        let mut pending = self.pending.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
        pending.take()
    }
}

/// Debounces values of `T` into a watch channel.
///
/// Must be used from within a tokio runtime; each `schedule` spawns a
/// timer task.
pub struct Debouncer<T> {
    delay: Duration,
    shared: Arc<Shared<T>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    rx: watch::Receiver<T>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a debouncer whose settled value starts as `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self {
            delay,
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                pending: Mutex::new(None),
                tx,
            }),
            timer: Mutex::new(None),
            rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Subscribe to settled values.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }

    /// The last settled value.
    pub fn settled(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Whether a value is waiting for its timer.
    pub fn is_pending(&self) -> bool {
        self.shared.pending.lock().is_some()
    }

    /// Replace the pending value and restart the timer.
    pub fn schedule(&self, value: T) {
        let generation = {
            let mut pending = self.shared.pending.lock();
            *pending = Some(value);
            self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let delay = self.delay;
        let shared = self.shared.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if shared.settle(generation) {
                tracing::debug!("Debounce settled after {:?}", delay);
            }
        });

        if let Some(previous) = self.timer.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Publish the pending value now, skipping the rest of the delay.
    /// Returns true if there was one.
    pub fn flush(&self) -> bool {
        self.abort_timer();
        match self.shared.supersede() {
            Some(value) => {
                self.shared.tx.send_replace(value);
                true
            }
            None => false,
        }
    }

    /// Drop the pending value without publishing it.
    pub fn cancel(&self) {
        self.abort_timer();
        self.shared.supersede();
    }

    /// Publish `value` immediately, discarding anything pending.
    pub fn set_now(&self, value: T) {
        self.cancel();
        self.shared.tx.send_replace(value);
    }

    fn abort_timer(&self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.lock().take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_settles() {
        let debouncer = Debouncer::new(String::new(), DELAY);
        let mut rx = debouncer.subscribe();

        debouncer.schedule("l".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("le".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        let last_keystroke = Instant::now();
        debouncer.schedule("lea".to_string());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "lea");
        assert!(last_keystroke.elapsed() >= DELAY);
        assert!(!debouncer.is_pending());

        // Nothing else was published
        tokio::time::sleep(DELAY * 2).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_settles_before_delay() {
        let debouncer = Debouncer::new(0u32, DELAY);
        let rx = debouncer.subscribe();

        debouncer.schedule(1);
        tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(debouncer.settled(), 0);
        assert!(debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_publishes_immediately() {
        let debouncer = Debouncer::new(String::new(), DELAY);
        debouncer.schedule("ann".to_string());

        assert!(debouncer.flush());
        assert_eq!(debouncer.settled(), "ann");
        assert!(!debouncer.flush());

        // The aborted timer never republishes
        let rx = debouncer.subscribe();
        tokio::time::sleep(DELAY * 2).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let debouncer = Debouncer::new(String::new(), DELAY);
        debouncer.schedule("gone".to_string());
        debouncer.cancel();

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(debouncer.settled(), "");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_leaves_newer_value_pending() {
        let debouncer = Debouncer::new(String::new(), DELAY);
        debouncer.schedule("le".to_string());
        let stale = debouncer.shared.generation.load(Ordering::SeqCst);
        debouncer.schedule("lea".to_string());

        // The first timer firing now must not take the second value
        assert!(!debouncer.shared.settle(stale));
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.settled(), "");

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(debouncer.settled(), "lea");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_and_immediate_agree() {
        let debounced = Debouncer::new(String::new(), DELAY);
        let immediate = Debouncer::new(String::new(), DELAY);

        for prefix in ["b", "br", "bre", "bret"] {
            debounced.schedule(prefix.to_string());
        }
        immediate.set_now("bret".to_string());

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(debounced.settled(), immediate.settled());
    }
}
