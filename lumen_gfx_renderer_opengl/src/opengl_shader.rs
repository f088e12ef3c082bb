/// OpenGlShader - one GLSL shader stage, compiled lazily on the context thread

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lumen_gfx::lumen::render::ShaderStage;
use lumen_gfx::lumen::{Error, Result};
use lumen_gfx::{engine_debug, engine_err, engine_error};

use crate::opengl::OpenGlContext;
use crate::opengl_api::{ObjectKind, ShaderHandle};
use crate::opengl_disposal::{DisposalQueue, GlDeferredResource};
use crate::opengl_extensions::{GlBackend, GlExtensions};
use crate::opengl_staging::{StagingBlock, StagingMemoryPool};

struct ShaderState {
    /// Source waiting for compilation; released once the compile succeeds
    staged_source: Option<StagingBlock>,
    handle: Option<ShaderHandle>,
    name: Option<String>,
    /// Name set since the last label upload
    name_pending: bool,
    disposed: bool,
}

/// OpenGL shader object
pub struct OpenGlShader {
    stage: ShaderStage,
    /// Kept for callers only; GLSL always enters at `main`
    entry_point: String,
    staging: Arc<StagingMemoryPool>,
    disposals: Arc<DisposalQueue>,
    state: Mutex<ShaderState>,
}

impl OpenGlShader {
    /// Stage the source of a shader; no GL call is made
    ///
    /// Fails with `UnsupportedFeature` when the stage cannot run on this
    /// context, and with `InvalidResource` when the source is not UTF-8 text.
    pub fn new(
        extensions: &GlExtensions,
        staging: Arc<StagingMemoryPool>,
        disposals: Arc<DisposalQueue>,
        stage: ShaderStage,
        source: &[u8],
        entry_point: &str,
    ) -> Result<Self> {
        check_stage_support(extensions, stage)?;

        if let Err(e) = std::str::from_utf8(source) {
            engine_error!("lumen::opengl::Shader", "{:?} shader source is not valid UTF-8: {}", stage, e);
            return Err(Error::InvalidResource(format!(
                "{:?} shader source is not valid UTF-8: {}",
                stage, e
            )));
        }

        let staged_source = staging.stage(source);

        Ok(Self {
            stage,
            entry_point: entry_point.to_string(),
            staging,
            disposals,
            state: Mutex::new(ShaderState {
                staged_source: Some(staged_source),
                handle: None,
                name: None,
                name_pending: false,
                disposed: false,
            }),
        })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Debug name, if one was set
    pub fn name(&self) -> Option<String> {
        self.state_unchecked().name.clone()
    }

    /// Set the debug name; it is uploaded on the next `ensure_created`
    pub fn set_name(&self, name: impl Into<String>) {
        let mut state = self.state_unchecked();
        state.name = Some(name.into());
        state.name_pending = true;
    }

    /// GL shader name once compiled
    pub fn handle(&self) -> Option<ShaderHandle> {
        self.state_unchecked().handle
    }

    pub fn is_created(&self) -> bool {
        self.state_unchecked().handle.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.state_unchecked().disposed
    }

    /// Compile the shader if needed and return its GL name
    ///
    /// Idempotent once it succeeds. A failed compile deletes the GL object
    /// but keeps the staged source.
    pub fn ensure_created(&self, ctx: &OpenGlContext) -> Result<ShaderHandle> {
        let mut state = self.lock_state()?;

        if state.disposed {
            engine_error!("lumen::opengl::Shader", "Shader [{}] used after disposal", display_name(&state));
            return Err(Error::InvalidResource(format!(
                "shader [{}] has been disposed",
                display_name(&state)
            )));
        }

        let handle = match state.handle {
            Some(handle) => handle,
            None => self.compile(ctx, &mut state)?,
        };

        if state.name_pending && ctx.debug_labels_enabled() {
            if let Some(name) = &state.name {
                ctx.api().object_label(ObjectKind::Shader, handle.raw(), name);
            }
            state.name_pending = false;
        }

        Ok(handle)
    }

    /// Hand the shader to the deferred-disposal queue
    pub fn dispose(self: &Arc<Self>) {
        self.disposals.enqueue(Arc::clone(self) as Arc<dyn GlDeferredResource>);
    }

    fn compile(&self, ctx: &OpenGlContext, state: &mut ShaderState) -> Result<ShaderHandle> {
        let source = state
            .staged_source
            .as_ref()
            .and_then(|block| {
                self.staging
                    .with_data(block, |bytes| String::from_utf8_lossy(bytes).into_owned())
            })
            .ok_or_else(|| {
                engine_err!(
                    "lumen::opengl::Shader",
                    "Shader [{}] has no staged source",
                    display_name(state)
                )
            })?;

        let api = ctx.api();
        let handle = api.create_shader(self.stage).map_err(|e| {
            engine_err!("lumen::opengl::Shader", "Failed to create {:?} shader object: {}", self.stage, e)
        })?;
        api.shader_source(handle, &source);
        api.compile_shader(handle);

        if !api.shader_compile_status(handle) {
            let log = api.shader_info_log(handle);
            api.delete_shader(handle);
            let name = display_name(state).to_string();
            engine_error!(
                "lumen::opengl::Shader",
                "Unable to compile shader code for shader [{}] of type {:?}: {}",
                name,
                self.stage,
                log
            );
            return Err(Error::CompileError { stage: self.stage, name, log });
        }

        if let Err(e) = ctx.check_error("lumen::opengl::Shader", "glCompileShader") {
            api.delete_shader(handle);
            return Err(e);
        }

        if let Some(block) = state.staged_source.take() {
            self.staging.free(block);
        }
        state.handle = Some(handle);

        engine_debug!(
            "lumen::opengl::Shader",
            "Compiled {:?} shader [{}] (GL name {})",
            self.stage,
            display_name(state),
            handle.raw()
        );
        Ok(handle)
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, ShaderState>> {
        self.state
            .lock()
            .map_err(|_| engine_err!("lumen::opengl::Shader", "Shader state lock poisoned"))
    }

    fn state_unchecked(&self) -> MutexGuard<'_, ShaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GlDeferredResource for OpenGlShader {
    fn destroy_gl_resources(&self, ctx: &OpenGlContext) {
        let mut state = self.state_unchecked();
        if state.disposed {
            return;
        }
        state.disposed = true;

        if let Some(handle) = state.handle.take() {
            ctx.api().delete_shader(handle);
        }
        if let Some(block) = state.staged_source.take() {
            self.staging.free(block);
        }
    }
}

fn display_name(state: &ShaderState) -> &str {
    state.name.as_deref().unwrap_or("<unnamed>")
}

/// Reject stages the context cannot compile
fn check_stage_support(extensions: &GlExtensions, stage: ShaderStage) -> Result<()> {
    let gles = extensions.backend() == GlBackend::OpenGlEs;
    let (capability, message) = match stage {
        ShaderStage::Compute if !extensions.compute_shaders() => (
            "compute shaders",
            if gles {
                "Compute shaders require OpenGL ES 3.1."
            } else {
                "Compute shaders require OpenGL 4.3 or ARB_compute_shader."
            },
        ),
        ShaderStage::TessellationControl | ShaderStage::TessellationEvaluation
            if gles && !extensions.tessellation_shaders() =>
        (
            "tessellation shaders",
            "Tessellation shaders require OpenGL ES 3.2 or EXT_tessellation_shader.",
        ),
        ShaderStage::Geometry if gles && !extensions.geometry_shaders() => (
            "geometry shaders",
            "Geometry shaders require OpenGL ES 3.2 or EXT_geometry_shader.",
        ),
        _ => return Ok(()),
    };

    engine_error!("lumen::opengl::Shader", "{}", message);
    Err(Error::UnsupportedFeature {
        capability: capability.to_string(),
        message: message.to_string(),
    })
}

#[cfg(test)]
#[path = "opengl_shader_tests.rs"]
mod tests;
