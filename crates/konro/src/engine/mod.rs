//! # Engine Adapter
//!
//! This module defines the seam between the dispatch layer and the actual
//! text-generation capability, allowing the lifecycle and queueing logic to
//! remain independent of any specific inference backend.
//!
//! Embedders provide the capability by:
//!
//! 1. Implementing [`Engine`] for the type that holds model, sampler, and
//!    context state
//! 2. Implementing [`EngineLoader`] for whatever constructs that type from
//!    an argument sequence and a [`ModelSource`](crate::ModelSource)
//! 3. Handing the loader to a [`Registry`](crate::Registry)
//!
//! The runner guarantees that `generate` is never invoked concurrently on
//! the same engine value, so implementations are free to assume exclusive
//! access.

mod core_trait;

// Re-export the core traits for convenient imports
pub use core_trait::*;

#[cfg(test)]
/// Deterministic in-process engine implementation.
///
/// Tracks how many engines are alive and in what order requests were served.
pub(crate) mod mock;
