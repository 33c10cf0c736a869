//! RAII scope guards for the interpreter.
//!
//! Every `if`/`else` body, loop iteration and call runs in a fresh child
//! scope that must be released when the body finishes, whether it finished
//! normally, by error, or by panic. [`ScopedInterpreter`] owns that release:
//! it derefs to the interpreter and releases its scope on drop.
//!
//! ```text
//! interpreter.with_child_env(env, |scoped, child| {
//!     scoped.envs.bind(child, name, value);
//!     scoped.run_block(child, Some(body))
//! }) // child released here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::EnvId;

/// Interpreter access while a child scope is live.
pub struct ScopedInterpreter<'guard, 's> {
    interpreter: &'guard mut Interpreter<'s>,
    env: EnvId,
}

impl ScopedInterpreter<'_, '_> {
    /// The child scope this guard releases.
    pub fn env(&self) -> EnvId {
        self.env
    }
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.envs.release(self.env);
    }
}

impl<'s> Deref for ScopedInterpreter<'_, 's> {
    type Target = Interpreter<'s>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'s> Interpreter<'s> {
    /// Open a child scope of `parent`, released when the guard drops.
    pub fn scoped(&mut self, parent: EnvId) -> ScopedInterpreter<'_, 's> {
        let env = self.envs.child(parent);
        ScopedInterpreter {
            interpreter: self,
            env,
        }
    }

    /// Run `f` with a fresh child scope of `parent`.
    pub fn with_child_env<T, F>(&mut self, parent: EnvId, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 's>, EnvId) -> T,
    {
        let mut scoped = self.scoped(parent);
        let env = scoped.env();
        f(&mut scoped, env)
    }
}
