use std::cell::Cell;
use std::rc::Rc;

use crate::host::Host;

#[derive(Debug, Default)]
struct EnvState {
    initialized: Cell<bool>,
    generation: Cell<u64>,
}

/// Page-wide state shared by every runtime created on one page.
///
/// Cloning shares the state. Initialization happens once per environment, and each new runtime
/// claims the environment, retiring the runtime that held it before.
#[derive(Clone, Debug, Default)]
pub struct RuntimeEnv {
    inner: Rc<EnvState>,
}

impl RuntimeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.get()
    }

    /// One-time page setup. Returns `true` on the call that did the work.
    pub fn ensure_initialized(&self, host: &mut dyn Host) -> bool {
        if self.inner.initialized.get() {
            return false;
        }
        if let Err(err) = host.set_manual_scroll_restoration() {
            tracing::warn!(%err, "could not switch scroll restoration to manual");
        }
        self.inner.initialized.set(true);
        true
    }

    /// Make the caller the active runtime.
    pub fn claim(&self) -> RuntimeLease {
        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);
        if generation > 1 {
            tracing::debug!(generation, "previous runtime retired");
        }
        RuntimeLease {
            env: self.clone(),
            generation,
        }
    }
}

/// Proof of being the active runtime. Goes stale when another runtime claims the environment.
#[derive(Debug)]
pub struct RuntimeLease {
    env: RuntimeEnv,
    generation: u64,
}

impl RuntimeLease {
    pub fn is_current(&self) -> bool {
        self.env.inner.generation.get() == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/env.rs"]
mod tests;
