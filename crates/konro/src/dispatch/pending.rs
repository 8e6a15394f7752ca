use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::Error;

/// # Pending
///
/// The producer-side future for a submitted request, resolving to the
/// request's result exactly once.
///
/// If the worker side is torn down without fulfilling the request (the
/// sender is dropped), the future resolves to
/// [`Error::QueueStopped`] rather than hanging.
#[derive(Debug)]
pub(crate) struct Pending {
    /// The underlying channel receiver
    receiver: oneshot::Receiver<Result<String, Error>>,
}

impl Pending {
    pub fn new(receiver: oneshot::Receiver<Result<String, Error>>) -> Self {
        Self { receiver }
    }
}

impl Future for Pending {
    type Output = Result<String, Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.get_mut().receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // Sender dropped without firing: the queue was torn down.
            Poll::Ready(Err(_)) => Poll::Ready(Err(Error::QueueStopped)),
            Poll::Pending => Poll::Pending,
        }
    }
}
