/// GlApi - the GL entry points used by shaders and pipelines
///
/// Everything the backend needs from OpenGL goes through this trait so that
/// the resolver can run against a real `glow::Context` or against the
/// call-recording mock used by the unit tests.
///
/// Implementations are not required to be `Send`/`Sync`: a GL function table
/// is only valid on the thread where its context is current, and the
/// `OpenGlContext` owning it inherits that restriction.

use std::num::NonZeroU32;

use lumen_gfx::lumen::render::ShaderStage;

/// GL name of a shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub NonZeroU32);

/// GL name of a program object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub NonZeroU32);

impl ShaderHandle {
    pub fn raw(&self) -> u32 {
        self.0.get()
    }
}

impl ProgramHandle {
    pub fn raw(&self) -> u32 {
        self.0.get()
    }
}

/// Object namespace for debug labels (`glObjectLabel` identifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Shader,
    Program,
}

/// `GL_NO_ERROR`
pub const GL_NO_ERROR: u32 = 0;

/// OpenGL entry points used by the binding resolver
pub trait GlApi {
    // ===== SHADERS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle, String>;
    fn shader_source(&self, shader: ShaderHandle, source: &str);
    fn compile_shader(&self, shader: ShaderHandle);
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&self, shader: ShaderHandle);

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<ProgramHandle, String>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn bind_attrib_location(&self, program: ProgramHandle, location: u32, name: &str);
    fn link_program(&self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;
    fn delete_program(&self, program: ProgramHandle);

    // ===== INTROSPECTION =====

    /// `glGetUniformBlockIndex`; `None` for `GL_INVALID_INDEX`
    fn uniform_block_index(&self, program: ProgramHandle, name: &str) -> Option<u32>;

    /// `GL_UNIFORM_BLOCK_DATA_SIZE` of an active block
    fn uniform_block_data_size(&self, program: ProgramHandle, block_index: u32) -> u32;

    /// `glGetUniformLocation`; -1 when the uniform is not active
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> i32;

    /// `glGetProgramResourceIndex(GL_SHADER_STORAGE_BLOCK)`; `None` for `GL_INVALID_INDEX`
    ///
    /// Only called when the program-interface query is available.
    fn shader_storage_block_index(&self, program: ProgramHandle, name: &str) -> Option<u32>;

    // ===== DEBUG =====

    /// `glObjectLabel`; only called when debug labels are supported
    fn object_label(&self, kind: ObjectKind, name: u32, label: &str);

    /// `glGetError`
    fn get_error(&self) -> u32;
}

// ============================================================================
// glow implementation
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod glow_api {
    use super::*;
    use glow::HasContext;

    fn stage_to_gl(stage: ShaderStage) -> u32 {
        match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::TessellationControl => glow::TESS_CONTROL_SHADER,
            ShaderStage::TessellationEvaluation => glow::TESS_EVALUATION_SHADER,
            ShaderStage::Geometry => glow::GEOMETRY_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
            ShaderStage::Compute => glow::COMPUTE_SHADER,
        }
    }

    fn native_shader(shader: ShaderHandle) -> glow::NativeShader {
        glow::NativeShader(shader.0)
    }

    fn native_program(program: ProgramHandle) -> glow::NativeProgram {
        glow::NativeProgram(program.0)
    }

    // SAFETY (all methods): the owning OpenGlContext is !Send, so these calls
    // only happen on the thread where the glow context was created and is current.
    impl GlApi for glow::Context {
        fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle, String> {
            unsafe { HasContext::create_shader(self, stage_to_gl(stage)).map(|s| ShaderHandle(s.0)) }
        }

        fn shader_source(&self, shader: ShaderHandle, source: &str) {
            unsafe { HasContext::shader_source(self, native_shader(shader), source) }
        }

        fn compile_shader(&self, shader: ShaderHandle) {
            unsafe { HasContext::compile_shader(self, native_shader(shader)) }
        }

        fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
            unsafe { self.get_shader_compile_status(native_shader(shader)) }
        }

        fn shader_info_log(&self, shader: ShaderHandle) -> String {
            unsafe { self.get_shader_info_log(native_shader(shader)) }
        }

        fn delete_shader(&self, shader: ShaderHandle) {
            unsafe { HasContext::delete_shader(self, native_shader(shader)) }
        }

        fn create_program(&self) -> Result<ProgramHandle, String> {
            unsafe { HasContext::create_program(self).map(|p| ProgramHandle(p.0)) }
        }

        fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
            unsafe { HasContext::attach_shader(self, native_program(program), native_shader(shader)) }
        }

        fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
            unsafe { HasContext::detach_shader(self, native_program(program), native_shader(shader)) }
        }

        fn bind_attrib_location(&self, program: ProgramHandle, location: u32, name: &str) {
            unsafe { HasContext::bind_attrib_location(self, native_program(program), location, name) }
        }

        fn link_program(&self, program: ProgramHandle) {
            unsafe { HasContext::link_program(self, native_program(program)) }
        }

        fn program_link_status(&self, program: ProgramHandle) -> bool {
            unsafe { self.get_program_link_status(native_program(program)) }
        }

        fn program_info_log(&self, program: ProgramHandle) -> String {
            unsafe { self.get_program_info_log(native_program(program)) }
        }

        fn delete_program(&self, program: ProgramHandle) {
            unsafe { HasContext::delete_program(self, native_program(program)) }
        }

        fn uniform_block_index(&self, program: ProgramHandle, name: &str) -> Option<u32> {
            unsafe { self.get_uniform_block_index(native_program(program), name) }
        }

        fn uniform_block_data_size(&self, program: ProgramHandle, block_index: u32) -> u32 {
            let size = unsafe {
                self.get_active_uniform_block_parameter_i32(
                    native_program(program),
                    block_index,
                    glow::UNIFORM_BLOCK_DATA_SIZE,
                )
            };
            size.max(0) as u32
        }

        fn uniform_location(&self, program: ProgramHandle, name: &str) -> i32 {
            unsafe { self.get_uniform_location(native_program(program), name) }
                .map(|location| location.0 as i32)
                .unwrap_or(-1)
        }

        fn shader_storage_block_index(&self, program: ProgramHandle, name: &str) -> Option<u32> {
            unsafe { self.get_shader_storage_block_index(native_program(program), name) }
        }

        fn object_label(&self, kind: ObjectKind, name: u32, label: &str) {
            let identifier = match kind {
                ObjectKind::Shader => glow::SHADER,
                ObjectKind::Program => glow::PROGRAM,
            };
            unsafe { HasContext::object_label(self, identifier, name, Some(label)) }
        }

        fn get_error(&self) -> u32 {
            unsafe { HasContext::get_error(self) }
        }
    }
}
