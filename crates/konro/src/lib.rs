//! # Konro
//!
//! A **single-burner** serving layer for blocking, non-reentrant
//! text-generation engines.
//!
//! ## Overview
//!
//! This library serializes concurrent caller requests onto exactly one
//! long-lived engine instance, and manages that instance's full lifecycle:
//! load, run, replace, unload. The engine itself (tokenization, sampling,
//! chat templating) is an external collaborator supplied by the embedder;
//! konro only guarantees exclusive, ordered access to it.
//!
//! Key components include:
//!
//! - A thread-safe FIFO dispatch queue with one-shot result delivery
//! - A runner that owns the engine's worker loop and lifecycle state machine
//! - A registry holding the single active runner behind the boundary
//!   operations `start`, `stop`, `generate`, and `chat`
//!
//! ## Architecture
//!
//! The library is built around a few guarantees that hold by construction:
//!
//! ### Assumptions
//!
//! The engine is treated as opaque, blocking, and non-reentrant:
//!  - A generation call may take arbitrary wall-clock time
//!  - Two generation calls must never overlap on the same engine state
//!  - Only the runner's worker task ever touches the engine after `start`
//!
//! ### Dispatch
//!
//! Callers submit a [`Message`] sequence (or a bare prompt) and await a
//! one-shot result. Requests are served strictly in submission order by a
//! single worker per runner. There is no batching, coalescing, priority
//! scheduling, or per-request cancellation.
//!
//! ### Lifecycle
//!
//! A [`Runner`](runner::Runner) moves through
//! `Created → Starting → Running → Stopping → Stopped` and never back.
//! Stopping drains the queue and fails every pending request with
//! [`Error::QueueStopped`] so no caller can block forever. The
//! [`Registry`](registry::Registry) holds at most one runner at a time;
//! starting a new one fully stops and releases the old one first.
//!
//! ## Model sources
//!
//! Engines can be constructed from a file path, an in-memory buffer, or a
//! memory-mapped region (see [`ModelSource`]). For the memory-based sources
//! the `-m`/`--model` flag is stripped from the argument string before the
//! loader runs.

mod args;
mod dispatch;
mod error;
mod message;
mod source;

pub mod engine;
pub mod registry;
pub mod runner;

pub use error::Error;
pub use message::{Message, Role, UnknownRole};
pub use registry::Registry;
pub use runner::{Runner, RunnerState, StartOptions};
pub use source::ModelSource;
