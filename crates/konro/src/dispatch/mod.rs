//! # Dispatch
//!
//! The producer/consumer seam between caller tasks and a runner's single
//! worker. Producers append requests to a [`DispatchQueue`] and await a
//! one-shot result; the worker drains the queue strictly FIFO and fulfills
//! each request exactly once.
//!
//! Stopping the queue drains every pending request and fails it with
//! [`Error::QueueStopped`](crate::Error::QueueStopped), so a caller blocked
//! on its result is always released in bounded time.

mod pending;
mod pill;
mod queue;
mod request;

pub(crate) use pill::Pill;
pub(crate) use queue::DispatchQueue;
