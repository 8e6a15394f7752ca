//! # Registry
//!
//! Process-wide holder of the single active [`Runner`], exposing the
//! boundary operations `start`, `stop`, `generate`, and `chat`.
//!
//! At most one runner is active per registry at any instant. Starting while
//! one is active fully stops and releases it first, so two engine instances
//! never coexist. `generate`/`chat` are safe to call from many tasks
//! concurrently; the runner's dispatch queue provides the only required
//! serialization.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::info;

use crate::engine::EngineLoader;
use crate::error::Error;
use crate::message::Message;
use crate::runner::{Runner, StartOptions};

/// Holder of the single active runner and the loader that builds engines
/// for it.
pub struct Registry<L: EngineLoader> {
    loader: L,
    active: Mutex<Option<Runner>>,
    next_id: AtomicU64,
}

impl<L: EngineLoader> Registry<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            active: Mutex::new(None),
            next_id: AtomicU64::new(0),
        }
    }

    /// Start a runner, replacing any active one.
    ///
    /// The previous runner is fully stopped (worker joined, engine
    /// released) before the new engine begins loading. If the new load
    /// fails, no runner is active afterwards.
    pub async fn start(&self, options: StartOptions) -> Result<(), Error> {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            info!(id = previous.id(), "replacing active runner");
            previous.stop().await?;
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let runner = Runner::new(id, options);
        runner.start(&self.loader).await?;
        *active = Some(runner);
        Ok(())
    }

    /// Stop and release the active runner. `Ok` when none is active.
    pub async fn stop(&self) -> Result<(), Error> {
        match self.active.lock().await.take() {
            None => Ok(()),
            Some(runner) => runner.stop().await,
        }
    }

    /// Generate a reply for a bare prompt on the active runner.
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.runner().await?.generate(prompt).await
    }

    /// Generate a reply for a conversation on the active runner.
    pub async fn chat(&self, messages: Vec<Message>) -> Result<String, Error> {
        self.runner().await?.chat(messages).await
    }

    pub async fn is_running(&self) -> bool {
        match &*self.active.lock().await {
            Some(runner) => runner.is_running(),
            None => false,
        }
    }

    /// Clone the active runner handle out of the slot so the engine call
    /// does not hold the slot lock.
    async fn runner(&self) -> Result<Runner, Error> {
        self.active
            .lock()
            .await
            .clone()
            .ok_or(Error::NoActiveRunner)
    }
}
