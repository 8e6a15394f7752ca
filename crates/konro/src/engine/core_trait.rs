use async_trait::async_trait;

use crate::error::Error;
use crate::message::Message;
use crate::source::ModelSource;

/// A blocking, non-reentrant text-generation capability.
///
/// The generation call may take arbitrary wall-clock time. It takes
/// `&mut self` because the underlying state (context, sampler, caches) must
/// never see two overlapping invocations; the runner enforces this by being
/// the engine's only caller, one request at a time.
///
/// # Example
///
/// ```ignore
/// use konro::engine::Engine;
/// use konro::{Error, Message};
/// use async_trait::async_trait;
///
/// struct MyEngine {
///     ctx: LlamaContext,
/// }
///
/// #[async_trait]
/// impl Engine for MyEngine {
///     async fn generate(&mut self, messages: &[Message]) -> Result<String, Error> {
///         let templated = self.ctx.apply_chat_template(messages)?;
///         self.ctx.decode(&templated)
///     }
/// }
/// ```
#[async_trait]
pub trait Engine: Send {
    /// Produce text for the conversation so far.
    ///
    /// Returning `Ok(String::new())` means the engine validly generated
    /// nothing; failures are reported as [`Error::Generation`].
    async fn generate(&mut self, messages: &[Message]) -> Result<String, Error>;
}

/// Constructs an [`Engine`] from an argument sequence and a model source.
///
/// `args` has already been tokenized, and for memory-based sources the
/// `-m`/`--model` flag has been stripped. Exactly one [`ModelSource`]
/// variant is supplied per load.
#[async_trait]
pub trait EngineLoader: Send + Sync {
    type Engine: Engine + 'static;

    async fn load(&self, args: &[String], source: &ModelSource) -> Result<Self::Engine, Error>;
}
