//! Shareable engine handle for callers that read while another mutates.

use std::sync::{Arc, RwLock};

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};
use crate::porcelain::{self, CommandOutput};

/// Cheaply clonable handle around one [`Engine`].
///
/// Writers are serialized by the lock. Readers only ever observe published
/// states because every engine operation replaces its state in one step.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Run `f` with shared access.
    pub fn read<T>(&self, f: impl FnOnce(&Engine) -> T) -> EngineResult<T> {
        let guard = self.inner.read().map_err(|_| EngineError::LockPoisoned)?;
        Ok(f(&*guard))
    }

    /// Run `f` with exclusive access.
    pub fn write<T>(&self, f: impl FnOnce(&mut Engine) -> T) -> EngineResult<T> {
        let mut guard = self.inner.write().map_err(|_| EngineError::LockPoisoned)?;
        Ok(f(&mut *guard))
    }

    /// Execute one tokenized command line.
    pub fn run_line_args(&self, args: &[String]) -> EngineResult<CommandOutput> {
        self.write(|engine| porcelain::run_line_args(engine, args))
    }
}

impl std::fmt::Debug for SharedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEngine").finish_non_exhaustive()
    }
}
