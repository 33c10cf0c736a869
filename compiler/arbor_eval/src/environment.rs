//! Variable scopes.
//!
//! Scopes live in a flat arena and are addressed by [`EnvId`]. Each scope
//! records the scope that was active where it was created; lookup walks that
//! chain outward. Binding only ever writes the scope it is given.
//!
//! Scopes are created and released in strict stack order (a block or call
//! always finishes before its parent does), so releasing a scope truncates
//! the arena and its slot is reused by the next child.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::Value;

/// Index of a scope in [`Environments`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct EnvId(u32);

impl EnvId {
    /// The root scope of a run. Never released.
    pub const ROOT: EnvId = EnvId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ROOT {
            write!(f, "EnvId::ROOT")
        } else {
            write!(f, "EnvId({})", self.0)
        }
    }
}

#[derive(Debug, Default)]
struct Frame {
    parent: Option<EnvId>,
    bindings: FxHashMap<String, Value>,
}

/// Arena of scopes for one program run.
#[derive(Debug)]
pub struct Environments {
    frames: Vec<Frame>,
}

impl Environments {
    /// Create an arena holding only the root scope.
    pub fn new() -> Self {
        Environments {
            frames: vec![Frame::default()],
        }
    }

    /// Number of live scopes, root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Create a child of `parent` and return its id.
    pub fn child(&mut self, parent: EnvId) -> EnvId {
        debug_assert!(parent.index() < self.frames.len(), "parent scope released");
        let id = EnvId(u32::try_from(self.frames.len()).unwrap_or(u32::MAX));
        self.frames.push(Frame {
            parent: Some(parent),
            bindings: FxHashMap::default(),
        });
        id
    }

    /// Release `env` and every scope created after it.
    ///
    /// The root scope is never released.
    pub fn release(&mut self, env: EnvId) {
        if env != EnvId::ROOT {
            self.frames.truncate(env.index());
        }
    }

    /// Look up `name` in `env`, then in each enclosing scope.
    pub fn lookup(&self, env: EnvId, name: &str) -> Option<&Value> {
        let mut current = Some(env);
        while let Some(id) = current {
            let frame = self.frames.get(id.index())?;
            if let Some(value) = frame.bindings.get(name) {
                return Some(value);
            }
            current = frame.parent;
        }
        None
    }

    /// Bind `name` in `env` itself. Enclosing scopes are never touched, so
    /// rebinding an outer name shadows it until `env` is released.
    pub fn bind(&mut self, env: EnvId, name: impl Into<String>, value: Value) {
        debug_assert!(env.index() < self.frames.len(), "binding into released scope");
        if let Some(frame) = self.frames.get_mut(env.index()) {
            frame.bindings.insert(name.into(), value);
        }
    }
}

impl Default for Environments {
    fn default() -> Self {
        Self::new()
    }
}
