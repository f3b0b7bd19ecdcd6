//! Callbacks and ordered callback chains.

use std::fmt;
use std::rc::Rc;

use crate::context::SyncScope;
use crate::errors::SyncResult;

pub type CallbackFn = dyn Fn(&mut SyncScope<'_>) -> SyncResult<()>;

/// A named change/click handler.
#[derive(Clone)]
pub struct Callback {
    name: String,
    func: Rc<CallbackFn>,
}

impl Callback {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut SyncScope<'_>) -> SyncResult<()> + 'static,
    {
        Self {
            name: name.into(),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, scope: &mut SyncScope<'_>) -> SyncResult<()> {
        (self.func)(scope)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").field("name", &self.name).finish()
    }
}

/// Callbacks invoked in order as a single handler.
///
/// The chain reports the name of the callback it was built around, so a
/// caller's handler keeps its identity after a query-string update is put in
/// front of it.
#[derive(Debug, Clone)]
pub struct CallbackChain {
    name: String,
    steps: Vec<Callback>,
}

impl CallbackChain {
    pub fn single(callback: Callback) -> Self {
        Self {
            name: callback.name().to_string(),
            steps: vec![callback],
        }
    }

    /// Run `pre` before `existing`, keeping the name of `existing` if given.
    pub fn wrapping(pre: Callback, existing: Option<Callback>) -> Self {
        match existing {
            None => Self::single(pre),
            Some(existing) => Self {
                name: existing.name().to_string(),
                steps: vec![pre, existing],
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Callback] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Invoke every step in order, stopping at the first error.
    pub fn invoke(&self, scope: &mut SyncScope<'_>) -> SyncResult<()> {
        for step in &self.steps {
            step.call(scope)?;
        }
        Ok(())
    }
}

impl From<Callback> for CallbackChain {
    fn from(callback: Callback) -> Self {
        Self::single(callback)
    }
}
