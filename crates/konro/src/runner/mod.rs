//! # Runner
//!
//! Lifecycle controller for one engine instance.
//!
//! A runner owns the dispatch queue and the worker task that is the
//! engine's only caller. The engine value itself lives inside the worker,
//! so producers can never touch it: everything flows through the queue.
//!
//! ## Lifecycle
//!
//! `Created → Starting → Running → Stopping → Stopped`, one way only.
//! `start` loads the engine from exactly one [`ModelSource`] variant and
//! spawns the worker; `stop` drains the queue, joins the worker, and with it
//! releases the engine. `stop` on an already-stopped runner is a no-op
//! success.

mod state;
mod worker;

pub use state::RunnerState;
use state::StateCell;
use worker::WorkerHandle;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::args;
use crate::dispatch::{DispatchQueue, Pill};
use crate::engine::{Engine, EngineLoader};
use crate::error::Error;
use crate::message::Message;
use crate::source::ModelSource;

/// Configuration for starting a [`Runner`].
#[derive(Clone, Debug)]
pub struct StartOptions {
    /// Whitespace-delimited engine flags, command-line style.
    pub args: String,

    /// Spawn the worker in the background (`true`, the default) or run the
    /// seed prompt inline before the worker comes up (`false`).
    pub background: bool,

    /// Prompt generated once at startup, before any queued request.
    pub seed_prompt: Option<String>,

    /// Where the model weights come from.
    pub source: ModelSource,
}

impl StartOptions {
    pub fn new(args: impl Into<String>, source: ModelSource) -> Self {
        Self {
            args: args.into(),
            background: true,
            seed_prompt: None,
            source,
        }
    }

    /// Run the seed prompt inline during `start` instead of on the worker.
    pub fn foreground(mut self) -> Self {
        self.background = false;
        self
    }

    pub fn with_seed_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.seed_prompt = Some(prompt.into());
        self
    }
}

struct RunnerInner {
    /// Monotonic identity assigned by the registry.
    id: u64,

    /// Tokenized arguments, model-path flag already stripped for memory
    /// sources.
    args: Vec<String>,

    source: ModelSource,
    background: bool,
    seed_prompt: Option<String>,

    state: StateCell,
    queue: Arc<DispatchQueue>,
    worker: Mutex<Option<WorkerHandle>>,
}

/// Lifecycle controller owning one engine instance, its dispatch queue, and
/// its worker task.
///
/// Cheap to clone; clones share the same underlying runner.
#[derive(Clone)]
pub struct Runner {
    inner: Arc<RunnerInner>,
}

impl Runner {
    pub fn new(id: u64, options: StartOptions) -> Self {
        let mut tokens = args::tokenize(&options.args);
        if options.source.is_in_memory() {
            tokens = args::strip_model_flag(tokens);
        }

        Self {
            inner: Arc::new(RunnerInner {
                id,
                args: tokens,
                source: options.source,
                background: options.background,
                seed_prompt: options.seed_prompt,
                state: StateCell::new(),
                queue: Arc::new(DispatchQueue::new()),
                worker: Mutex::new(None),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn state(&self) -> RunnerState {
        self.inner.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunnerState::Running
    }

    /// The argument tokens the engine loader will receive.
    pub fn args(&self) -> &[String] {
        &self.inner.args
    }

    /// Load the engine and bring the worker up.
    ///
    /// With `background` unset, the seed prompt (if any) is generated inline
    /// and `start` returns only after it completes; otherwise the worker
    /// runs it as its first iteration. Either way the runner is `Running`
    /// and serving the queue when `start` returns `Ok`.
    pub async fn start<L: EngineLoader>(&self, loader: &L) -> Result<(), Error> {
        let inner = &self.inner;
        if !inner.state.transition(RunnerState::Created, RunnerState::Starting) {
            return Err(Error::engine_load(format!(
                "runner {} cannot start from state {:?}",
                inner.id,
                inner.state.get()
            )));
        }

        let mut engine = match loader.load(&inner.args, &inner.source).await {
            Ok(engine) => engine,
            Err(error) => {
                inner.state.set(RunnerState::Stopped);
                return Err(error);
            }
        };
        info!(id = inner.id, "engine loaded");

        let seed_for_worker = if inner.background {
            inner.seed_prompt.clone()
        } else {
            if let Some(prompt) = &inner.seed_prompt {
                if let Err(error) = engine.generate(&[Message::user(prompt.clone())]).await {
                    inner.state.set(RunnerState::Stopped);
                    return Err(error);
                }
                debug!(id = inner.id, "seed prompt completed inline");
            }
            None
        };

        let handle = WorkerHandle::new(inner.queue.clone(), {
            let id = inner.id;
            let queue = inner.queue.clone();
            move |running| tokio::spawn(serve(id, engine, queue, running, seed_for_worker))
        });
        *inner.worker.lock().await = Some(handle);

        inner.state.set(RunnerState::Running);
        info!(id = inner.id, "runner running");
        Ok(())
    }

    /// Stop the queue, join the worker, and release the engine.
    ///
    /// Idempotent: stopping a runner that never ran, or ran and already
    /// stopped, succeeds without doing anything.
    pub async fn stop(&self) -> Result<(), Error> {
        let inner = &self.inner;
        if !inner.state.transition(RunnerState::Running, RunnerState::Stopping) {
            // Never started: close it out so it cannot start later.
            inner.state.transition(RunnerState::Created, RunnerState::Stopped);
            debug!(id = inner.id, state = ?inner.state.get(), "stop is a no-op");
            return Ok(());
        }

        inner.queue.stop().await;
        if let Some(mut handle) = inner.worker.lock().await.take() {
            handle.shutdown().await;
        }

        inner.state.set(RunnerState::Stopped);
        info!(id = inner.id, "runner stopped");
        Ok(())
    }

    /// Generate a reply for a bare prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.chat(vec![Message::user(prompt)]).await
    }

    /// Generate a reply for a conversation.
    ///
    /// Submits a request to the dispatch queue and awaits its one-shot
    /// result; concurrent callers are serialized FIFO by the single worker.
    pub async fn chat(&self, messages: Vec<Message>) -> Result<String, Error> {
        if !self.is_running() {
            return Err(Error::NoActiveRunner);
        }
        let pending = self.inner.queue.submit(messages).await?;
        pending.await
    }
}

/// The worker loop: sole consumer of the queue, sole caller of the engine.
///
/// The engine is moved in here and dropped when the loop exits, which is
/// what releases model resources on shutdown.
async fn serve<E: Engine>(
    id: u64,
    mut engine: E,
    queue: Arc<DispatchQueue>,
    running: Arc<AtomicBool>,
    seed_prompt: Option<String>,
) {
    let _pill = Pill::new();

    if let Some(prompt) = seed_prompt {
        match engine.generate(&[Message::user(prompt)]).await {
            Ok(_) => debug!(id, "seed prompt completed"),
            Err(error) => warn!(id, %error, "seed prompt failed"),
        }
    }

    while running.load(Ordering::SeqCst) {
        let Some(request) = queue.next().await else {
            break;
        };
        debug!(id, request = %request.id(), "serving request");
        let result = engine.generate(request.messages()).await;
        if let Err(error) = &result {
            warn!(id, request = %request.id(), %error, "generation failed");
        }
        request.fulfill(result);
    }
    debug!(id, "worker loop exited");
}
