/// Shader stages and shader descriptor

use bitflags::bitflags;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Tessellation control (hull) shader
    TessellationControl,
    /// Tessellation evaluation (domain) shader
    TessellationEvaluation,
    /// Geometry shader
    Geometry,
    /// Fragment/Pixel shader
    Fragment,
    /// Compute shader
    Compute,
}

impl ShaderStage {
    /// Visibility flag matching this stage
    pub fn flag(&self) -> ShaderStages {
        match self {
            ShaderStage::Vertex => ShaderStages::VERTEX,
            ShaderStage::TessellationControl => ShaderStages::TESSELLATION_CONTROL,
            ShaderStage::TessellationEvaluation => ShaderStages::TESSELLATION_EVALUATION,
            ShaderStage::Geometry => ShaderStages::GEOMETRY,
            ShaderStage::Fragment => ShaderStages::FRAGMENT,
            ShaderStage::Compute => ShaderStages::COMPUTE,
        }
    }
}

bitflags! {
    /// Set of shader stages a resource is visible to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStages: u32 {
        const VERTEX = 1 << 0;
        const TESSELLATION_CONTROL = 1 << 1;
        const TESSELLATION_EVALUATION = 1 << 2;
        const GEOMETRY = 1 << 3;
        const FRAGMENT = 1 << 4;
        const COMPUTE = 1 << 5;
        const VERTEX_FRAGMENT = Self::VERTEX.bits() | Self::FRAGMENT.bits();
    }
}

impl ShaderStages {
    /// Create from a slice of ShaderStage
    pub fn from_stages(stages: &[ShaderStage]) -> Self {
        stages.iter().fold(ShaderStages::empty(), |acc, stage| acc | stage.flag())
    }
}

/// Descriptor for creating a shader
///
/// OpenGL consumes GLSL source text; the bytes are staged by the backend
/// until the shader is compiled on the context thread.
#[derive(Debug, Clone)]
pub struct ShaderDesc<'a> {
    /// Shader source (GLSL text for the OpenGL backend)
    pub code: &'a [u8],
    /// Shader stage
    pub stage: ShaderStage,
    /// Entry point function name
    ///
    /// Informational for OpenGL: GLSL always enters at `main`, so the backend
    /// stores it but does not use it to select a function.
    pub entry_point: String,
    /// Optional debug name
    pub name: Option<String>,
}

impl<'a> ShaderDesc<'a> {
    /// Descriptor with the conventional `main` entry point and no name
    pub fn new(stage: ShaderStage, code: &'a [u8]) -> Self {
        Self {
            code,
            stage,
            entry_point: "main".to_string(),
            name: None,
        }
    }

    /// Set the debug name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
