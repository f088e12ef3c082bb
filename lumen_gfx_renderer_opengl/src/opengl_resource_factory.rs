/// OpenGlResourceFactory - creates shaders and pipelines for one context
///
/// The factory makes no GL call and can be cloned to any thread. Objects it
/// returns are created on first use through `OpenGlContext`.

use std::sync::Arc;

use lumen_gfx::lumen::render::{
    ComputePipelineDesc, GraphicsPipelineDesc, PipelineDesc, ShaderDesc, ShaderStage,
};
use lumen_gfx::lumen::{Error, Result};
use lumen_gfx::{engine_debug, engine_error};

use crate::opengl_config::OpenGlConfig;
use crate::opengl_disposal::DisposalQueue;
use crate::opengl_extensions::GlExtensions;
use crate::opengl_pipeline::OpenGlPipeline;
use crate::opengl_shader::OpenGlShader;
use crate::opengl_staging::StagingMemoryPool;

/// Shader and pipeline factory
#[derive(Clone)]
pub struct OpenGlResourceFactory {
    extensions: Arc<GlExtensions>,
    config: OpenGlConfig,
    staging: Arc<StagingMemoryPool>,
    disposals: Arc<DisposalQueue>,
}

impl OpenGlResourceFactory {
    pub(crate) fn new(
        extensions: Arc<GlExtensions>,
        config: OpenGlConfig,
        staging: Arc<StagingMemoryPool>,
        disposals: Arc<DisposalQueue>,
    ) -> Self {
        Self { extensions, config, staging, disposals }
    }

    pub fn extensions(&self) -> &GlExtensions {
        &self.extensions
    }

    /// Stage a shader for compilation
    pub fn create_shader(&self, desc: &ShaderDesc) -> Result<Arc<OpenGlShader>> {
        let shader = OpenGlShader::new(
            &self.extensions,
            Arc::clone(&self.staging),
            Arc::clone(&self.disposals),
            desc.stage,
            desc.code,
            &desc.entry_point,
        )?;
        if let Some(name) = &desc.name {
            shader.set_name(name.clone());
        }

        engine_debug!(
            "lumen::opengl::Factory",
            "Staged {:?} shader [{}] ({} bytes)",
            desc.stage,
            desc.name.as_deref().unwrap_or("<unnamed>"),
            desc.code.len()
        );
        Ok(Arc::new(shader))
    }

    pub fn create_graphics_pipeline(
        &self,
        desc: GraphicsPipelineDesc<Arc<OpenGlShader>>,
    ) -> Result<Arc<OpenGlPipeline>> {
        if self.config.enable_validation {
            validate_graphics_stages(&desc)?;
        }
        Ok(Arc::new(OpenGlPipeline::new(desc.into(), Arc::clone(&self.disposals))))
    }

    pub fn create_compute_pipeline(
        &self,
        desc: ComputePipelineDesc<Arc<OpenGlShader>>,
    ) -> Result<Arc<OpenGlPipeline>> {
        if self.config.enable_validation && desc.shader.stage() != ShaderStage::Compute {
            return Err(invalid(format!(
                "compute pipeline built with a {:?} shader",
                desc.shader.stage()
            )));
        }
        Ok(Arc::new(OpenGlPipeline::new(desc.into(), Arc::clone(&self.disposals))))
    }

    /// Create either kind of pipeline
    pub fn create_pipeline(&self, desc: PipelineDesc<Arc<OpenGlShader>>) -> Result<Arc<OpenGlPipeline>> {
        match desc {
            PipelineDesc::Graphics(desc) => self.create_graphics_pipeline(desc),
            PipelineDesc::Compute(desc) => self.create_compute_pipeline(desc),
        }
    }
}

fn validate_graphics_stages(desc: &GraphicsPipelineDesc<Arc<OpenGlShader>>) -> Result<()> {
    if desc.shaders.is_empty() {
        return Err(invalid("graphics pipeline has no shader stage".to_string()));
    }
    if desc.shaders.iter().any(|shader| shader.stage() == ShaderStage::Compute) {
        return Err(invalid("graphics pipeline contains a compute shader".to_string()));
    }
    Ok(())
}

fn invalid(message: String) -> Error {
    engine_error!("lumen::opengl::Factory", "{}", message);
    Error::InvalidResource(message)
}

#[cfg(test)]
#[path = "opengl_resource_factory_tests.rs"]
mod tests;
