/// OpenGlPipeline - linked GL program and its resolved resource bindings
///
/// Creation is lazy. `OpenGlPipeline::new` only stores the description; the
/// first `ensure_resources_created` on the context thread compiles the
/// shaders, links the program and resolves every resource set into a sealed
/// `SetBindingInfo`. Binding lookups afterwards are plain slot indexing and
/// never query the program again.
///
/// Slot resolution rules:
/// - Uniform buffers map to their uniform block index; inactive blocks are left unbound.
/// - Read-only textures and read-write images each take the next value of their
///   own relative counter. Both counters run across all sets of the pipeline.
/// - A sampler applies to every read-only texture declared since the previous
///   sampler of the same set. Images never feed a sampler.
/// - Structured buffers use the storage block index when the program interface
///   query is available, otherwise the next sequential binding point.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use lumen_gfx::lumen::render::{
    ComputePipelineDesc, GraphicsPipelineDesc, PipelineDesc, ResourceKind, ResourceLayoutDesc,
};
use lumen_gfx::lumen::{Error, Result};
use lumen_gfx::{engine_debug, engine_err, engine_error, engine_trace};

use crate::opengl::OpenGlContext;
use crate::opengl_api::{ObjectKind, ProgramHandle, ShaderHandle};
use crate::opengl_binding_table::{
    SamplerBindingSlot, SetBindingInfo, SetBindingInfoBuilder, SlotBinding, StorageBufferBinding,
    TextureBindingSlot, UniformBinding,
};
use crate::opengl_disposal::{DisposalQueue, GlDeferredResource};
use crate::opengl_shader::OpenGlShader;

/// Bytes of program info log kept on link failure
pub const MAX_LINK_LOG_BYTES: usize = 4096;

struct PipelineState {
    program: Option<ProgramHandle>,
    name: Option<String>,
    name_pending: bool,
    disposed: bool,
}

/// OpenGL graphics or compute pipeline
pub struct OpenGlPipeline {
    desc: PipelineDesc<Arc<OpenGlShader>>,
    vertex_strides: Vec<u32>,
    disposals: Arc<DisposalQueue>,
    state: Mutex<PipelineState>,
    sets: OnceLock<Vec<SetBindingInfo>>,
}

impl OpenGlPipeline {
    /// Store the description; no GL call is made
    pub fn new(desc: PipelineDesc<Arc<OpenGlShader>>, disposals: Arc<DisposalQueue>) -> Self {
        let vertex_strides = match &desc {
            PipelineDesc::Graphics(graphics) => {
                graphics.vertex_layouts.iter().map(|layout| layout.stride).collect()
            }
            PipelineDesc::Compute(_) => Vec::new(),
        };

        Self {
            desc,
            vertex_strides,
            disposals,
            state: Mutex::new(PipelineState {
                program: None,
                name: None,
                name_pending: false,
                disposed: false,
            }),
            sets: OnceLock::new(),
        }
    }

    pub fn desc(&self) -> &PipelineDesc<Arc<OpenGlShader>> {
        &self.desc
    }

    pub fn is_compute_pipeline(&self) -> bool {
        self.desc.is_compute_pipeline()
    }

    /// Byte stride of each vertex layout, in binding order
    pub fn vertex_strides(&self) -> &[u32] {
        &self.vertex_strides
    }

    /// Linked program, `None` before creation or after teardown
    pub fn program(&self) -> Option<ProgramHandle> {
        self.state_unchecked().program
    }

    pub fn is_created(&self) -> bool {
        self.state_unchecked().program.is_some()
    }

    pub fn name(&self) -> Option<String> {
        self.state_unchecked().name.clone()
    }

    /// Set the program debug label; uploaded on the next `ensure_resources_created`
    pub fn set_name(&self, name: impl Into<String>) {
        let mut state = self.state_unchecked();
        state.name = Some(name.into());
        state.name_pending = true;
    }

    /// Link the program and resolve bindings if not done yet
    pub fn ensure_resources_created(&self, ctx: &OpenGlContext) -> Result<()> {
        let mut state = self.lock_state()?;

        if state.disposed {
            engine_error!("lumen::opengl::Pipeline", "Pipeline used after disposal");
            return Err(Error::InvalidResource("pipeline has been disposed".to_string()));
        }

        let program = match state.program {
            Some(program) => program,
            None => {
                let program = match &self.desc {
                    PipelineDesc::Graphics(desc) => create_graphics_program(ctx, desc)?,
                    PipelineDesc::Compute(desc) => create_compute_program(ctx, desc)?,
                };
                let sets = resolve_resource_sets(ctx, program, self.desc.resource_layouts());
                if self.sets.set(sets).is_err() {
                    engine_trace!("lumen::opengl::Pipeline", "Binding tables already sealed");
                }
                state.program = Some(program);
                engine_debug!(
                    "lumen::opengl::Pipeline",
                    "Linked {} program {} ({} resource set(s))",
                    if self.is_compute_pipeline() { "compute" } else { "graphics" },
                    program.raw(),
                    self.desc.resource_layouts().len()
                );
                program
            }
        };

        if state.name_pending && ctx.debug_labels_enabled() {
            if let Some(name) = &state.name {
                ctx.api().object_label(ObjectKind::Program, program.raw(), name);
            }
            state.name_pending = false;
        }

        Ok(())
    }

    /// Hand the pipeline to the deferred-disposal queue
    pub fn dispose(self: &Arc<Self>) {
        self.disposals.enqueue(Arc::clone(self) as Arc<dyn GlDeferredResource>);
    }

    // ===== BINDING LOOKUPS =====
    //
    // All lookups require a created pipeline and panic otherwise.

    pub fn set_count(&self) -> usize {
        self.sealed_sets().len()
    }

    pub fn set_binding_info(&self, set: u32) -> Option<&SetBindingInfo> {
        self.sealed_sets().get(set as usize)
    }

    pub fn uniform_binding_for_slot(&self, set: u32, slot: u32) -> Option<&UniformBinding> {
        self.set_binding_info(set)?.uniform_binding(slot)
    }

    pub fn texture_binding_info(&self, set: u32, slot: u32) -> Option<&TextureBindingSlot> {
        self.set_binding_info(set)?.texture_binding(slot)
    }

    pub fn sampler_binding_info(&self, set: u32, slot: u32) -> Option<&SamplerBindingSlot> {
        self.set_binding_info(set)?.sampler_binding(slot)
    }

    pub fn storage_buffer_binding_for_slot(&self, set: u32, slot: u32) -> Option<&StorageBufferBinding> {
        self.set_binding_info(set)?.storage_buffer_binding(slot)
    }

    fn sealed_sets(&self) -> &[SetBindingInfo] {
        match self.sets.get() {
            Some(sets) => sets,
            None => panic!("binding lookup on a pipeline whose resources are not created"),
        }
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, PipelineState>> {
        self.state
            .lock()
            .map_err(|_| engine_err!("lumen::opengl::Pipeline", "Pipeline state lock poisoned"))
    }

    fn state_unchecked(&self) -> MutexGuard<'_, PipelineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GlDeferredResource for OpenGlPipeline {
    fn destroy_gl_resources(&self, ctx: &OpenGlContext) {
        let mut state = self.state_unchecked();
        if state.disposed {
            return;
        }
        state.disposed = true;

        if let Some(program) = state.program.take() {
            ctx.api().delete_program(program);
            engine_debug!("lumen::opengl::Pipeline", "Deleted program {}", program.raw());
        }
    }
}

// ============================================================================
// Program creation
// ============================================================================

fn create_program(ctx: &OpenGlContext) -> Result<ProgramHandle> {
    let program = ctx
        .api()
        .create_program()
        .map_err(|e| engine_err!("lumen::opengl::Pipeline", "Failed to create GL program: {}", e))?;

    if let Err(e) = ctx.check_error("lumen::opengl::Pipeline", "glCreateProgram") {
        ctx.api().delete_program(program);
        return Err(e);
    }
    Ok(program)
}

/// Compile each shader and attach it; the program is deleted on failure
fn attach_shaders(
    ctx: &OpenGlContext,
    program: ProgramHandle,
    shaders: &[Arc<OpenGlShader>],
) -> Result<Vec<ShaderHandle>> {
    let mut handles = Vec::with_capacity(shaders.len());
    for shader in shaders {
        let handle = match shader.ensure_created(ctx) {
            Ok(handle) => handle,
            Err(e) => {
                ctx.api().delete_program(program);
                return Err(e);
            }
        };
        ctx.api().attach_shader(program, handle);
        handles.push(handle);
    }
    Ok(handles)
}

/// Link; on failure capture the log and delete the program
fn link_program(ctx: &OpenGlContext, program: ProgramHandle) -> Result<()> {
    let api = ctx.api();
    api.link_program(program);

    if !api.program_link_status(program) {
        let log = truncate_log(api.program_info_log(program), MAX_LINK_LOG_BYTES);
        api.delete_program(program);
        engine_error!("lumen::opengl::Pipeline", "Error linking GL program: {}", log);
        return Err(Error::LinkError { log });
    }

    if let Err(e) = ctx.check_error("lumen::opengl::Pipeline", "glLinkProgram") {
        api.delete_program(program);
        return Err(e);
    }
    Ok(())
}

fn create_graphics_program(
    ctx: &OpenGlContext,
    desc: &GraphicsPipelineDesc<Arc<OpenGlShader>>,
) -> Result<ProgramHandle> {
    let program = create_program(ctx)?;
    let attached = attach_shaders(ctx, program, &desc.shaders)?;

    // Attribute locations follow declaration order across every layout
    let api = ctx.api();
    let mut location = 0u32;
    for layout in &desc.vertex_layouts {
        for element in &layout.elements {
            api.bind_attrib_location(program, location, &element.name);
            location += 1;
        }
    }

    link_program(ctx, program)?;

    for shader in attached {
        api.detach_shader(program, shader);
    }
    Ok(program)
}

fn create_compute_program(
    ctx: &OpenGlContext,
    desc: &ComputePipelineDesc<Arc<OpenGlShader>>,
) -> Result<ProgramHandle> {
    let program = create_program(ctx)?;
    attach_shaders(ctx, program, std::slice::from_ref(&desc.shader))?;
    link_program(ctx, program)?;
    Ok(program)
}

/// Keep at most `max_bytes` of `log`, cut on a char boundary
fn truncate_log(mut log: String, max_bytes: usize) -> String {
    if log.len() > max_bytes {
        let mut end = max_bytes;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}

// ============================================================================
// Resource set resolution
// ============================================================================

/// Counters shared by every set of one pipeline
#[derive(Default)]
struct RelativeCounters {
    texture: u32,
    image: u32,
    storage: u32,
}

fn next(counter: &mut u32) -> u32 {
    let value = *counter;
    *counter += 1;
    value
}

fn resolve_resource_sets(
    ctx: &OpenGlContext,
    program: ProgramHandle,
    layouts: &[ResourceLayoutDesc],
) -> Vec<SetBindingInfo> {
    let query_storage_blocks = ctx.extensions().program_interface_query();
    let mut counters = RelativeCounters::default();

    layouts
        .iter()
        .enumerate()
        .map(|(set, layout)| {
            let info = resolve_set(ctx, program, set, layout, query_storage_blocks, &mut counters);
            engine_trace!(
                "lumen::opengl::Pipeline",
                "Set {}: {} slot(s), {} uniform block(s), {} storage block(s)",
                set,
                info.slot_count(),
                info.uniform_buffer_count(),
                info.storage_buffer_count()
            );
            info
        })
        .collect()
}

fn resolve_set(
    ctx: &OpenGlContext,
    program: ProgramHandle,
    set: usize,
    layout: &ResourceLayoutDesc,
    query_storage_blocks: bool,
    counters: &mut RelativeCounters,
) -> SetBindingInfo {
    let api = ctx.api();
    let mut builder = SetBindingInfoBuilder::new(layout.len());
    let mut pending_textures: Vec<u32> = Vec::new();

    for (slot, element) in layout.elements.iter().enumerate() {
        let slot = slot as u32;
        let name = element.name.as_str();

        let binding = match element.kind {
            ResourceKind::UniformBuffer => match api.uniform_block_index(program, name) {
                Some(block_index) => SlotBinding::Uniform(UniformBinding {
                    program,
                    block_index,
                    block_size: api.uniform_block_data_size(program, block_index),
                }),
                None => {
                    engine_trace!(
                        "lumen::opengl::Pipeline",
                        "Set {} slot {}: uniform block '{}' is not active",
                        set,
                        slot,
                        name
                    );
                    SlotBinding::None
                }
            },
            ResourceKind::TextureReadOnly => {
                let uniform_location = api.uniform_location(program, name);
                let relative_index = next(&mut counters.texture);
                pending_textures.push(relative_index);
                SlotBinding::Texture(TextureBindingSlot { relative_index, uniform_location })
            }
            ResourceKind::TextureReadWrite => {
                let uniform_location = api.uniform_location(program, name);
                let relative_index = next(&mut counters.image);
                SlotBinding::Texture(TextureBindingSlot { relative_index, uniform_location })
            }
            ResourceKind::StructuredBufferReadOnly | ResourceKind::StructuredBufferReadWrite => {
                if query_storage_blocks {
                    match api.shader_storage_block_index(program, name) {
                        Some(binding) => SlotBinding::StorageBuffer(StorageBufferBinding { binding }),
                        None => {
                            engine_trace!(
                                "lumen::opengl::Pipeline",
                                "Set {} slot {}: storage block '{}' is not active",
                                set,
                                slot,
                                name
                            );
                            SlotBinding::None
                        }
                    }
                } else {
                    SlotBinding::StorageBuffer(StorageBufferBinding {
                        binding: next(&mut counters.storage),
                    })
                }
            }
            ResourceKind::Sampler => SlotBinding::Sampler(SamplerBindingSlot {
                texture_indices: std::mem::take(&mut pending_textures),
            }),
        };

        builder.bind(slot, binding);
    }

    builder.build()
}

#[cfg(test)]
#[path = "opengl_pipeline_tests.rs"]
mod tests;
