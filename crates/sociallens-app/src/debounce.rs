use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default settling delay for search inputs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Suppresses intermediate values of a rapidly changing input.
///
/// Every call to [`Debouncer::settle`] supersedes the calls before it. Only
/// the most recent value survives the delay.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay, then return `value` unless a newer value was
    /// submitted in the meantime.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.generation.load(Ordering::SeqCst) == ticket).then_some(value)
    }
}
