use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Read-only view of the pager's fractional index.
///
/// Intended for indicators and numeric readouts. Only the latest value is
/// kept; a slow consumer skips intermediate frames.
#[derive(Clone)]
pub struct IndexObserver {
    rx: watch::Receiver<f32>,
    runtime: Handle,
}

impl IndexObserver {
    pub(crate) fn new(rx: watch::Receiver<f32>, runtime: Handle) -> Self {
        Self { rx, runtime }
    }

    pub fn latest(&self) -> f32 {
        *self.rx.borrow()
    }

    /// Latest value formatted with two decimals.
    pub fn display(&self) -> String {
        format!("{:.2}", self.latest())
    }

    /// Wait for the next value. Returns `None` once the pager is gone.
    pub async fn changed(&mut self) -> Option<f32> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// Deliver the current value and every later change to `display`, off the frame path.
    ///
    /// Runs on the pager's runtime and may be called from any thread.
    pub fn bridge<F>(mut self, mut display: F) -> JoinHandle<()>
    where
        F: FnMut(f32) + Send + 'static,
    {
        let runtime = self.runtime.clone();
        runtime.spawn(async move {
            display(*self.rx.borrow_and_update());
            while let Some(value) = self.changed().await {
                display(value);
            }
        })
    }
}
