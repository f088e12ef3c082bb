//! Unit tests for DisposalQueue

use super::*;
use crate::mock_gl_api::MockGlApi;
use crate::opengl_extensions::{GlBackend, GlExtensions};
use crate::opengl_config::OpenGlConfig;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Default)]
struct CountingResource {
    destroyed: AtomicU32,
}

impl GlDeferredResource for CountingResource {
    fn destroy_gl_resources(&self, _ctx: &OpenGlContext) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }
}

fn context() -> OpenGlContext {
    OpenGlContext::new(
        Box::new(MockGlApi::new()),
        GlExtensions::new(GlBackend::OpenGl, 4, 5, Vec::<String>::new()),
        OpenGlConfig::default(),
    )
}

#[test]
fn test_enqueue_and_drain() {
    let queue = DisposalQueue::new();
    assert!(queue.is_empty());

    queue.enqueue(Arc::new(CountingResource::default()));
    queue.enqueue(Arc::new(CountingResource::default()));
    assert_eq!(queue.len(), 2);

    let drained = queue.drain();
    assert_eq!(drained.len(), 2);
    assert!(queue.is_empty());
}

#[test]
fn test_flush_runs_teardown_on_context() {
    let ctx = context();
    let resource = Arc::new(CountingResource::default());
    ctx.disposal_queue().enqueue(resource.clone());

    assert_eq!(ctx.flush_disposals(), 1);
    assert_eq!(resource.destroyed.load(Ordering::SeqCst), 1);
    assert_eq!(ctx.flush_disposals(), 0);
}

#[test]
fn test_context_drop_flushes_pending() {
    let resource = Arc::new(CountingResource::default());
    {
        let ctx = context();
        ctx.disposal_queue().enqueue(resource.clone());
    }
    assert_eq!(resource.destroyed.load(Ordering::SeqCst), 1);
}
