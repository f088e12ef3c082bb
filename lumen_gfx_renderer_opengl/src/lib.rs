/*!
# Lumen GFX - OpenGL Backend

OpenGL implementation of the Lumen graphics layer.

This crate compiles GLSL shaders, links programs and resolves the
backend-neutral resource layouts of `lumen_gfx` into concrete GL binding
points (uniform block indices, texture units, uniform locations, shader
storage bindings). GL entry points are reached through `glow`.

## Threading

`OpenGlContext` is neither `Send` nor `Sync`: all GL work happens on the
thread that owns it. Shaders and pipelines are `Send + Sync`; their GL
objects are created lazily and destroyed through the context's disposal queue.

## Example

```no_run
use lumen_gfx::lumen::render::{GraphicsPipelineDesc, ResourceKind, ResourceLayoutDesc,
    ResourceLayoutElementDesc, ShaderDesc, ShaderStage, ShaderStages};
use lumen_gfx_renderer_opengl::{OpenGlConfig, OpenGlContext};

# fn run(gl: glow::Context) -> lumen_gfx::lumen::Result<()> {
let ctx = OpenGlContext::from_glow(gl, OpenGlConfig::default());
let factory = ctx.resource_factory();

let vs = factory.create_shader(&ShaderDesc::new(ShaderStage::Vertex, b"..."))?;
let fs = factory.create_shader(&ShaderDesc::new(ShaderStage::Fragment, b"..."))?;
let layout = ResourceLayoutDesc::new(vec![
    ResourceLayoutElementDesc::new("Frame", ResourceKind::UniformBuffer, ShaderStages::VERTEX),
]);

let pipeline = factory.create_graphics_pipeline(
    GraphicsPipelineDesc::new(vec![vs, fs], Vec::new(), vec![layout]),
)?;
pipeline.ensure_resources_created(&ctx)?;
let frame = pipeline.uniform_binding_for_slot(0, 0);
# let _ = frame;
# Ok(())
# }
```
*/

mod opengl;
mod opengl_api;
mod opengl_binding_table;
mod opengl_config;
mod opengl_disposal;
mod opengl_extensions;
mod opengl_pipeline;
mod opengl_resource_factory;
mod opengl_shader;
mod opengl_staging;

#[cfg(test)]
mod mock_gl_api;

pub use opengl::OpenGlContext;
pub use opengl_api::{GlApi, ObjectKind, ProgramHandle, ShaderHandle, GL_NO_ERROR};
pub use opengl_binding_table::{
    SamplerBindingSlot, SetBindingInfo, SetBindingInfoBuilder, SlotBinding, StorageBufferBinding,
    TextureBindingSlot, UniformBinding,
};
pub use opengl_config::OpenGlConfig;
pub use opengl_disposal::{DisposalQueue, GlDeferredResource};
pub use opengl_extensions::{GlBackend, GlExtensions};
pub use opengl_pipeline::{OpenGlPipeline, MAX_LINK_LOG_BYTES};
pub use opengl_resource_factory::OpenGlResourceFactory;
pub use opengl_shader::OpenGlShader;
pub use opengl_staging::{StagingBlock, StagingBlockKey, StagingMemoryPool};
