use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify, oneshot};
use tracing::{debug, warn};

use super::pending::Pending;
use super::request::Request;
use crate::error::Error;
use crate::message::Message;

/// How long the consumer sleeps between wakeup re-checks.
const WAKE_INTERVAL: Duration = Duration::from_millis(100);

/// # DispatchQueue
///
/// An unbounded FIFO of pending [`Request`]s shared between arbitrary
/// producer tasks and exactly one consumer (the runner's worker).
///
/// ## Contract
///
/// - [`submit`](DispatchQueue::submit) appends at the tail and wakes the
///   consumer; requests are never reordered or coalesced.
/// - [`next`](DispatchQueue::next) is consumer-only and blocks until a
///   request is available or the queue has stopped.
/// - [`stop`](DispatchQueue::stop) resolves every request still queued with
///   [`Error::QueueStopped`] before returning, so no producer blocks
///   forever. Requests submitted after `stop` fail the same way.
///
/// There is no maximum depth; the only backpressure is each producer
/// awaiting its own turn at the head of the queue.
pub(crate) struct DispatchQueue {
    pending: Mutex<VecDeque<Request>>,
    notifier: Notify,
    stopped: AtomicBool,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            notifier: Notify::new(),
            stopped: AtomicBool::new(false),
        }
    }

    /// Append a request for `messages` and return the future for its result.
    ///
    /// Safe to call from many tasks concurrently.
    pub async fn submit(&self, messages: Vec<Message>) -> Result<Pending, Error> {
        let (tx, rx) = oneshot::channel();
        let request = Request::new(messages, tx);
        {
            // Stop is checked under the same lock that guards the push, so a
            // request is either rejected here or guaranteed to be drained.
            let mut pending = self.pending.lock().await;
            if self.stopped.load(Ordering::SeqCst) {
                return Err(Error::QueueStopped);
            }
            debug!(request = %request.id(), depth = pending.len(), "request queued");
            pending.push_back(request);
        }
        self.notifier.notify_one();
        Ok(Pending::new(rx))
    }

    /// Take the next request in FIFO order.
    ///
    /// Blocks until the queue is non-empty or stopped; `None` signals
    /// end-of-stream (stopped and drained).
    pub async fn next(&self) -> Option<Request> {
        loop {
            {
                let mut pending = self.pending.lock().await;
                if let Some(request) = pending.pop_front() {
                    return Some(request);
                }
                if self.stopped.load(Ordering::SeqCst) {
                    return None;
                }
            }
            // Re-check periodically in case a notification raced the wait.
            let _ = tokio::time::timeout(WAKE_INTERVAL, self.notifier.notified()).await;
        }
    }

    /// Set the stop flag and wake the consumer without draining.
    ///
    /// Used on the last-resort drop path; remaining requests are then served
    /// or drained by whoever still holds the queue.
    pub fn halt(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.notifier.notify_waiters();
    }

    /// Stop the queue and fail every request still pending.
    pub async fn stop(&self) {
        self.halt();
        let drained: Vec<Request> = {
            let mut pending = self.pending.lock().await;
            pending.drain(..).collect()
        };
        if !drained.is_empty() {
            warn!(count = drained.len(), "failing requests pending at stop");
        }
        for request in drained {
            request.fulfill(Err(Error::QueueStopped));
        }
    }

    #[cfg(test)]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
