/// Mock GL function table for unit tests (no GPU required)
///
/// Records every call and answers introspection queries from a configurable
/// program description. Clones share state, so a test can keep one clone
/// while the `OpenGlContext` owns the other.

use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lumen_gfx::lumen::render::ShaderStage;

use crate::opengl_api::{GlApi, ObjectKind, ProgramHandle, ShaderHandle, GL_NO_ERROR};

/// One recorded GL call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlCall {
    CreateShader(ShaderStage),
    ShaderSource { shader: u32, source: String },
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    BindAttribLocation { program: u32, location: u32, name: String },
    LinkProgram(u32),
    DeleteProgram(u32),
    UniformBlockIndex(String),
    UniformLocation(String),
    StorageBlockIndex(String),
    ObjectLabel { kind: ObjectKind, name: u32, label: String },
}

#[derive(Default)]
struct MockState {
    next_name: u32,
    calls: Vec<GlCall>,
    /// name -> (block index, data size)
    uniform_blocks: FxHashMap<String, (u32, u32)>,
    uniform_locations: FxHashMap<String, i32>,
    storage_blocks: FxHashMap<String, u32>,
    compile_failure: Option<String>,
    link_failure: Option<String>,
    program_creation_fails: bool,
    pending_errors: Vec<u32>,
}

/// Call-recording GL stand-in
#[derive(Clone, Default)]
pub struct MockGlApi {
    state: Rc<RefCell<MockState>>,
}

impl MockGlApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an active uniform block; indices follow declaration order
    pub fn with_uniform_block(self, name: &str, size: u32) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let index = state.uniform_blocks.len() as u32;
            state.uniform_blocks.insert(name.to_string(), (index, size));
        }
        self
    }

    /// Declare an active sampler/image uniform
    pub fn with_uniform(self, name: &str, location: i32) -> Self {
        self.state.borrow_mut().uniform_locations.insert(name.to_string(), location);
        self
    }

    /// Declare an active shader storage block
    pub fn with_storage_block(self, name: &str, index: u32) -> Self {
        self.state.borrow_mut().storage_blocks.insert(name.to_string(), index);
        self
    }

    /// Make every shader compile fail with `log`
    pub fn failing_compile(self, log: &str) -> Self {
        self.state.borrow_mut().compile_failure = Some(log.to_string());
        self
    }

    /// Make every program link fail with `log`
    pub fn failing_link(self, log: &str) -> Self {
        self.state.borrow_mut().link_failure = Some(log.to_string());
        self
    }

    /// Make `glCreateProgram` fail
    pub fn failing_program_creation(self) -> Self {
        self.state.borrow_mut().program_creation_fails = true;
        self
    }

    /// Queue an error code returned by the next `glGetError`
    pub fn push_error(&self, code: u32) {
        self.state.borrow_mut().pending_errors.push(code);
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&GlCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn next_name(&self) -> NonZeroU32 {
        let mut state = self.state.borrow_mut();
        state.next_name += 1;
        NonZeroU32::new(state.next_name).unwrap_or(NonZeroU32::MIN)
    }
}

impl GlApi for MockGlApi {
    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle, String> {
        self.record(GlCall::CreateShader(stage));
        Ok(ShaderHandle(self.next_name()))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        self.record(GlCall::ShaderSource { shader: shader.raw(), source: source.to_string() });
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        self.record(GlCall::CompileShader(shader.raw()));
    }

    fn shader_compile_status(&self, _shader: ShaderHandle) -> bool {
        self.state.borrow().compile_failure.is_none()
    }

    fn shader_info_log(&self, _shader: ShaderHandle) -> String {
        self.state.borrow().compile_failure.clone().unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        self.record(GlCall::DeleteShader(shader.raw()));
    }

    fn create_program(&self) -> Result<ProgramHandle, String> {
        self.record(GlCall::CreateProgram);
        if self.state.borrow().program_creation_fails {
            return Err("out of program names".to_string());
        }
        Ok(ProgramHandle(self.next_name()))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(GlCall::AttachShader { program: program.raw(), shader: shader.raw() });
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        self.record(GlCall::DetachShader { program: program.raw(), shader: shader.raw() });
    }

    fn bind_attrib_location(&self, program: ProgramHandle, location: u32, name: &str) {
        self.record(GlCall::BindAttribLocation {
            program: program.raw(),
            location,
            name: name.to_string(),
        });
    }

    fn link_program(&self, program: ProgramHandle) {
        self.record(GlCall::LinkProgram(program.raw()));
    }

    fn program_link_status(&self, _program: ProgramHandle) -> bool {
        self.state.borrow().link_failure.is_none()
    }

    fn program_info_log(&self, _program: ProgramHandle) -> String {
        self.state.borrow().link_failure.clone().unwrap_or_default()
    }

    fn delete_program(&self, program: ProgramHandle) {
        self.record(GlCall::DeleteProgram(program.raw()));
    }

    fn uniform_block_index(&self, _program: ProgramHandle, name: &str) -> Option<u32> {
        self.record(GlCall::UniformBlockIndex(name.to_string()));
        self.state.borrow().uniform_blocks.get(name).map(|(index, _)| *index)
    }

    fn uniform_block_data_size(&self, _program: ProgramHandle, block_index: u32) -> u32 {
        self.state
            .borrow()
            .uniform_blocks
            .values()
            .find(|(index, _)| *index == block_index)
            .map(|(_, size)| *size)
            .unwrap_or(0)
    }

    fn uniform_location(&self, _program: ProgramHandle, name: &str) -> i32 {
        self.record(GlCall::UniformLocation(name.to_string()));
        self.state.borrow().uniform_locations.get(name).copied().unwrap_or(-1)
    }

    fn shader_storage_block_index(&self, _program: ProgramHandle, name: &str) -> Option<u32> {
        self.record(GlCall::StorageBlockIndex(name.to_string()));
        self.state.borrow().storage_blocks.get(name).copied()
    }

    fn object_label(&self, kind: ObjectKind, name: u32, label: &str) {
        self.record(GlCall::ObjectLabel { kind, name, label: label.to_string() });
    }

    fn get_error(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        if state.pending_errors.is_empty() {
            GL_NO_ERROR
        } else {
            state.pending_errors.remove(0)
        }
    }
}
