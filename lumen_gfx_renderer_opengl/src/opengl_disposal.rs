/// DisposalQueue - deferred destruction of GL objects
///
/// Shaders and pipelines may be dropped from any thread, but their GL names
/// can only be deleted on the context thread. `dispose()` pushes the object
/// here; `OpenGlContext::flush_disposals` drains the queue on the right thread.

use std::sync::{Arc, Mutex, PoisonError};

use crate::opengl::OpenGlContext;

/// A resource holding GL names that must be released on the context thread
pub trait GlDeferredResource: Send + Sync {
    /// Delete the GL objects; calling it again is a no-op
    fn destroy_gl_resources(&self, ctx: &OpenGlContext);
}

/// Queue of resources waiting for teardown
#[derive(Default)]
pub struct DisposalQueue {
    pending: Mutex<Vec<Arc<dyn GlDeferredResource>>>,
}

impl DisposalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, resource: Arc<dyn GlDeferredResource>) {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).push(resource);
    }

    /// Take every pending resource, leaving the queue empty
    pub fn drain(&self) -> Vec<Arc<dyn GlDeferredResource>> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "opengl_disposal_tests.rs"]
mod tests;
