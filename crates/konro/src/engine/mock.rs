use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{Engine, EngineLoader};
use crate::error::Error;
use crate::message::Message;
use crate::source::ModelSource;

// A simple deterministic engine for testing the dispatch and lifecycle
// layers. Output depends only on the --seed argument and the last message,
// so repeated runs with the same inputs produce identical text.
#[derive(Debug)]
pub(crate) struct MockEngine {
    seed: u64,
    delay: Duration,
    fail_generation: bool,
    live: Arc<AtomicUsize>,
    served: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Engine for MockEngine {
    async fn generate(&mut self, messages: &[Message]) -> Result<String, Error> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_generation {
            return Err(Error::generation("mock generation failure"));
        }
        let prompt = messages.last().map(Message::content).unwrap_or("");
        self.served.lock().unwrap().push(prompt.to_string());
        Ok(format!("gen[{}]: {prompt}", self.seed))
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Builds [`MockEngine`]s and records their collective behavior.
pub(crate) struct MockLoader {
    fail_load: bool,
    fail_next_load: AtomicBool,
    fail_generation: bool,
    delay: Duration,
    live: Arc<AtomicUsize>,
    served: Arc<Mutex<Vec<String>>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self {
            fail_load: false,
            fail_next_load: AtomicBool::new(false),
            fail_generation: false,
            delay: Duration::ZERO,
            live: Arc::new(AtomicUsize::new(0)),
            served: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail only the next `load` call.
    pub fn fail_next(&self) {
        self.fail_next_load.store(true, Ordering::SeqCst);
    }

    /// Every `load` call fails.
    pub fn failing() -> Self {
        Self {
            fail_load: true,
            ..Self::new()
        }
    }

    /// Engines load fine but every generation fails.
    pub fn failing_generation() -> Self {
        Self {
            fail_generation: true,
            ..Self::new()
        }
    }

    /// Engines sleep for `delay` before producing output.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new()
        }
    }

    /// How many engines built by this loader are currently alive.
    pub fn live_engines(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Prompts served so far, in service order across all engines.
    pub fn served(&self) -> Vec<String> {
        self.served.lock().unwrap().clone()
    }
}

#[async_trait]
impl EngineLoader for MockLoader {
    type Engine = MockEngine;

    async fn load(&self, args: &[String], source: &ModelSource) -> Result<Self::Engine, Error> {
        if self.fail_load || self.fail_next_load.swap(false, Ordering::SeqCst) {
            return Err(Error::engine_load("mock load failure"));
        }
        // A memory-based source must never reach the loader with a model
        // path flag still present.
        if source.is_in_memory() && args.iter().any(|a| a == "-m" || a == "--model") {
            return Err(Error::engine_load("model path flag with in-memory source"));
        }
        let seed = args
            .iter()
            .position(|a| a == "--seed")
            .and_then(|i| args.get(i + 1))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(MockEngine {
            seed,
            delay: self.delay,
            fail_generation: self.fail_generation,
            live: self.live.clone(),
            served: self.served.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn output_is_deterministic_for_a_fixed_seed() {
        let loader = MockLoader::new();
        let args = vec!["--seed".to_string(), "7".to_string()];
        let source = ModelSource::buffer(vec![0]);

        let mut first = loader.load(&args, &source).await.unwrap();
        let mut second = loader.load(&args, &source).await.unwrap();
        let msgs = vec![Message::user("hello")];

        assert_eq!(
            first.generate(&msgs).await.unwrap(),
            second.generate(&msgs).await.unwrap()
        );
    }

    #[tokio::test]
    async fn live_count_tracks_engine_lifetimes() {
        let loader = MockLoader::new();
        let source = ModelSource::buffer(vec![0]);

        let engine = loader.load(&[], &source).await.unwrap();
        assert_eq!(loader.live_engines(), 1);
        drop(engine);
        assert_eq!(loader.live_engines(), 0);
    }

    #[tokio::test]
    async fn rejects_model_flag_with_memory_source() {
        let loader = MockLoader::new();
        let args = vec!["-m".to_string(), "x.gguf".to_string()];
        let err = loader
            .load(&args, &ModelSource::buffer(vec![0]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EngineLoad { .. }));
        assert_eq!(loader.live_engines(), 0);
    }
}
