//! Handle for a runner's background worker task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

use crate::dispatch::DispatchQueue;

/// A handle for managing the worker task that is the engine's only caller.
///
/// The handle owns the running flag and the join handle; the worker loop
/// itself lives in the runner. Shutting down stops the queue first so the
/// worker observes end-of-stream, then awaits the task so the engine held
/// inside it is released before `shutdown` returns.
pub(crate) struct WorkerHandle {
    /// Queue the worker is draining; stopped during shutdown.
    queue: Arc<DispatchQueue>,

    /// Flag indicating whether the worker should keep serving.
    running: Arc<AtomicBool>,

    /// Handle to the spawned task, taken on shutdown.
    handle: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Spawn the worker via `task`, handing it the shared running flag.
    pub fn new<F>(queue: Arc<DispatchQueue>, task: F) -> Self
    where
        F: FnOnce(Arc<AtomicBool>) -> JoinHandle<()>,
    {
        let running = Arc::new(AtomicBool::new(true));
        let handle = task(running.clone());

        Self {
            queue,
            running,
            handle: Some(handle),
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the worker and wait for it to exit.
    pub async fn shutdown(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.queue.stop().await;

        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for WorkerHandle {
    /// Last-resort cleanup when the handle is dropped without `shutdown`.
    ///
    /// The queue is halted and the worker detached; it exits on its next
    /// wakeup. Requests still queued at that point are resolved by the drop
    /// of their result senders, not served.
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.queue.halt();
        self.handle.take();
    }
}
