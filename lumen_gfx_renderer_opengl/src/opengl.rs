/// OpenGlContext - single-threaded owner of the GL function table
///
/// Every GL call made by shaders and pipelines goes through a context
/// reference. The context owns a `Box<dyn GlApi>` that is neither `Send` nor
/// `Sync`, so the compiler keeps all GL work on the thread that created it.
/// Objects created through the factory can travel to other threads; their
/// teardown comes back here through the disposal queue.

use std::sync::Arc;

use lumen_gfx::lumen::Result;
use lumen_gfx::{engine_bail, engine_debug};

use crate::opengl_api::{GlApi, GL_NO_ERROR};
use crate::opengl_config::OpenGlConfig;
use crate::opengl_disposal::DisposalQueue;
use crate::opengl_extensions::GlExtensions;
use crate::opengl_resource_factory::OpenGlResourceFactory;
use crate::opengl_staging::StagingMemoryPool;

/// OpenGL execution context
pub struct OpenGlContext {
    api: Box<dyn GlApi>,
    extensions: Arc<GlExtensions>,
    config: OpenGlConfig,
    staging: Arc<StagingMemoryPool>,
    disposals: Arc<DisposalQueue>,
}

impl OpenGlContext {
    /// Wrap a GL function table whose context is current on this thread
    pub fn new(api: Box<dyn GlApi>, extensions: GlExtensions, config: OpenGlConfig) -> Self {
        engine_debug!(
            "lumen::opengl",
            "OpenGL context {:?} {}.{} (validation: {}, compute: {}, program interface query: {})",
            extensions.backend(),
            extensions.version().0,
            extensions.version().1,
            config.enable_validation,
            extensions.compute_shaders(),
            extensions.program_interface_query()
        );

        Self {
            api,
            extensions: Arc::new(extensions),
            config,
            staging: Arc::new(StagingMemoryPool::new()),
            disposals: Arc::new(DisposalQueue::new()),
        }
    }

    /// Build a context around a glow context, detecting its capabilities
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_glow(gl: glow::Context, config: OpenGlConfig) -> Self {
        let extensions = GlExtensions::from_glow(&gl);
        Self::new(Box::new(gl), extensions, config)
    }

    pub fn api(&self) -> &dyn GlApi {
        self.api.as_ref()
    }

    pub fn extensions(&self) -> &GlExtensions {
        &self.extensions
    }

    pub fn config(&self) -> &OpenGlConfig {
        &self.config
    }

    pub fn staging_pool(&self) -> &Arc<StagingMemoryPool> {
        &self.staging
    }

    pub fn disposal_queue(&self) -> &Arc<DisposalQueue> {
        &self.disposals
    }

    /// Factory for shaders and pipelines bound to this context
    pub fn resource_factory(&self) -> OpenGlResourceFactory {
        OpenGlResourceFactory::new(
            Arc::clone(&self.extensions),
            self.config,
            Arc::clone(&self.staging),
            Arc::clone(&self.disposals),
        )
    }

    /// Destroy every disposed resource; returns how many were torn down
    pub fn flush_disposals(&self) -> usize {
        let pending = self.disposals.drain();
        for resource in &pending {
            resource.destroy_gl_resources(self);
        }
        if !pending.is_empty() {
            engine_debug!("lumen::opengl", "Destroyed {} deferred GL resource(s)", pending.len());
        }
        pending.len()
    }

    /// True when object labels should be applied
    pub(crate) fn debug_labels_enabled(&self) -> bool {
        self.config.enable_debug_labels && self.extensions.debug_labels()
    }

    /// Check `glGetError` after `operation` when validation is enabled
    pub(crate) fn check_error(&self, source: &str, operation: &str) -> Result<()> {
        if !self.config.enable_validation {
            return Ok(());
        }
        let code = self.api.get_error();
        if code != GL_NO_ERROR {
            engine_bail!(source, "{} raised GL error 0x{:04X}", operation, code);
        }
        Ok(())
    }
}

impl Drop for OpenGlContext {
    fn drop(&mut self) {
        self.flush_disposals();
    }
}
