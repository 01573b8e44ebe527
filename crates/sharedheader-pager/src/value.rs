use std::sync::Arc;
use tokio::sync::watch;

/// Observable value cell.
///
/// Readers call [`SharedValue::get`] or hold a receiver from
/// [`SharedValue::subscribe`] to react to changes. Only the latest value is
/// retained; intermediate writes may never be observed by a slow subscriber.
pub struct SharedValue<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for SharedValue<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T> SharedValue<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        let (tx, _) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Store `value`, notifying subscribers only if it differs from the current one.
    pub fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(move |current| {
            if *current != value {
                *current = value;
                true
            } else {
                false
            }
        })
    }

    /// Store `value` and notify subscribers unconditionally. Returns the previous value.
    pub fn replace(&self, value: T) -> T {
        self.tx.send_replace(value)
    }

    /// Mutate in place. Subscribers are notified when `f` returns true.
    pub fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}
