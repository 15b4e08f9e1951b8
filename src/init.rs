//! Single-Flight Initialization
//!
//! Lazily built shared state where concurrent first callers wait on one
//! in-flight initialization and all observe its outcome.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

use crate::error::{Result, SynonymsError};

type Outcome<T> = Result<Arc<T>>;
type Flight<T> = Shared<BoxFuture<'static, Outcome<T>>>;

enum Slot<T: Send + Sync + 'static> {
    Empty,
    InFlight(Flight<T>),
    Settled(Outcome<T>),
}

/// Lazy value with single-flight initialization and sticky failure
///
/// The initializer runs on its own tokio task, so a caller that gives up
/// waiting (a timeout, a dropped future) neither cancels nor restarts it.
/// A failed outcome stays until [`SingleFlight::reset_failed`] clears it.
pub struct SingleFlight<T: Send + Sync + 'static> {
    slot: Mutex<Slot<T>>,
}

impl<T: Send + Sync + 'static> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> SingleFlight<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Empty),
        }
    }

    /// Already initialized with `value`
    pub fn ready(value: T) -> Self {
        Self {
            slot: Mutex::new(Slot::Settled(Ok(Arc::new(value)))),
        }
    }

    /// Return the ready value, starting `init` if nobody has started it yet
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let flight = {
            let mut slot = self.slot.lock();
            let running = match &*slot {
                Slot::Settled(outcome) => return outcome.clone(),
                Slot::InFlight(flight) => Some(flight.clone()),
                Slot::Empty => None,
            };
            match running {
                Some(flight) => flight,
                None => {
                    let task = tokio::spawn(init());
                    let flight = async move {
                        match task.await {
                            Ok(outcome) => outcome.map(Arc::new),
                            Err(e) => Err(SynonymsError::worker(e)),
                        }
                    }
                    .boxed()
                    .shared();
                    *slot = Slot::InFlight(flight.clone());
                    flight
                }
            }
        };

        let outcome = flight.clone().await;

        // A retry may have replaced the flight while we waited
        let mut slot = self.slot.lock();
        if let Slot::InFlight(current) = &*slot {
            if current.ptr_eq(&flight) {
                *slot = Slot::Settled(outcome.clone());
            }
        }
        outcome
    }

    /// The value, if initialization already succeeded
    pub fn get(&self) -> Option<Arc<T>> {
        match &*self.slot.lock() {
            Slot::Settled(Ok(value)) => Some(Arc::clone(value)),
            Slot::InFlight(flight) => match flight.peek() {
                Some(Ok(value)) => Some(Arc::clone(value)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether initialization finished (successfully or not)
    pub fn is_settled(&self) -> bool {
        match &*self.slot.lock() {
            Slot::Empty => false,
            Slot::InFlight(flight) => flight.peek().is_some(),
            Slot::Settled(_) => true,
        }
    }

    /// Forget a failed outcome so the next call initializes again
    ///
    /// Returns false when the cell is empty, in flight or ready.
    pub fn reset_failed(&self) -> bool {
        let mut slot = self.slot.lock();
        let failed = match &*slot {
            Slot::Settled(outcome) => outcome.is_err(),
            Slot::InFlight(flight) => matches!(flight.peek(), Some(Err(_))),
            Slot::Empty => false,
        };
        if failed {
            *slot = Slot::Empty;
        }
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Initializer that counts its runs and settles after `delay`
    fn counted(
        runs: &Arc<AtomicUsize>,
        delay: Duration,
        outcome: Result<usize>,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<usize>> {
        let runs = Arc::clone(runs);
        move || {
            async move {
                runs.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                outcome
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_init() {
        let cell = Arc::new(SingleFlight::<usize>::new());
        let runs = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cell = Arc::clone(&cell);
            let init = counted(&runs, Duration::from_millis(20), Ok(42));
            handles.push(tokio::spawn(async move { cell.get_or_init(init).await }));
        }

        for handle in handles {
            assert_eq!(*handle.await.unwrap().unwrap(), 42);
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(cell.get().map(|v| *v), Some(42));
    }

    #[tokio::test]
    async fn test_abandoned_caller_does_not_restart_init() {
        let cell = SingleFlight::<usize>::new();
        let runs = Arc::new(AtomicUsize::new(0));

        let slow = counted(&runs, Duration::from_millis(200), Ok(7));
        let gave_up = tokio::time::timeout(Duration::from_millis(20), cell.get_or_init(slow)).await;
        assert!(gave_up.is_err());
        assert!(!cell.is_settled());

        let value = cell
            .get_or_init(counted(&runs, Duration::ZERO, Ok(8)))
            .await
            .unwrap();
        assert_eq!(*value, 7);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_shared_and_sticky() {
        let cell = SingleFlight::<usize>::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let missing = || Err(SynonymsError::model_load("m.vector", "missing"));

        let (a, b) = tokio::join!(
            cell.get_or_init(counted(&runs, Duration::from_millis(10), missing())),
            cell.get_or_init(counted(&runs, Duration::from_millis(10), missing())),
        );
        assert_eq!(a.unwrap_err(), b.unwrap_err());
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // No implicit retry
        let again = cell.get_or_init(counted(&runs, Duration::ZERO, Ok(1))).await;
        assert!(again.is_err());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(cell.is_settled());
        assert!(cell.get().is_none());
    }

    #[tokio::test]
    async fn test_reset_failed_allows_retry() {
        let cell = SingleFlight::<&'static str>::new();
        assert!(!cell.reset_failed());

        let bad_header = SynonymsError::model_load("m", "bad header");
        let _ = cell.get_or_init(|| async move { Err(bad_header) }).await;
        assert!(cell.reset_failed());
        assert!(!cell.is_settled());

        let value = cell.get_or_init(|| async { Ok("ready") }).await.unwrap();
        assert_eq!(*value, "ready");
        assert!(!cell.reset_failed());
    }

    #[tokio::test]
    async fn test_ready_value() {
        let cell = SingleFlight::ready(3usize);
        assert!(cell.is_settled());
        assert_eq!(cell.get().map(|v| *v), Some(3));
        let value = cell.get_or_init(|| async { Ok(4) }).await.unwrap();
        assert_eq!(*value, 3);
    }
}
