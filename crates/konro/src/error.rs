use thiserror::Error;

/// Errors surfaced by the dispatch and lifecycle layer.
///
/// Engine failures are typed rather than collapsed into an empty string, so
/// callers can tell "generated nothing" (`Ok("")`) apart from "failed".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The engine could not be constructed from the given arguments and
    /// model source.
    #[error("failed to load engine: {reason}")]
    EngineLoad { reason: String },

    /// `generate`/`chat` was invoked while no runner is in the `Running`
    /// state.
    #[error("no active runner")]
    NoActiveRunner,

    /// The dispatch queue was stopped before this request could be served,
    /// or the request was submitted after the queue had stopped.
    #[error("dispatch queue stopped before the request was served")]
    QueueStopped,

    /// The engine accepted the request but failed while producing text.
    #[error("generation failed: {reason}")]
    Generation { reason: String },
}

impl Error {
    /// Shorthand for an [`Error::EngineLoad`], for engine loaders.
    pub fn engine_load(reason: impl Into<String>) -> Self {
        Self::EngineLoad {
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`Error::Generation`], for engine implementations.
    pub fn generation(reason: impl Into<String>) -> Self {
        Self::Generation {
            reason: reason.into(),
        }
    }
}
